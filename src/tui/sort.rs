//! Sort orders for the resource list.

use crate::model::Resource;

/// How displayed resources are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Order of appearance in the plan
    #[default]
    PlanOrder,
    /// By action severity, then address
    ByAction,
    ByAddress,
    /// By resource type, then address
    ByType,
}

impl SortMode {
    /// Picker order.
    pub const ALL: [Self; 4] = [Self::PlanOrder, Self::ByAction, Self::ByAddress, Self::ByType];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PlanOrder => "plan order",
            Self::ByAction => "action",
            Self::ByAddress => "address",
            Self::ByType => "type",
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    /// Sort resource indices in place. The sort is stable, so equal keys keep
    /// plan order.
    pub fn apply(self, indices: &mut [usize], resources: &[Resource]) {
        match self {
            Self::PlanOrder => {}
            Self::ByAction => indices.sort_by(|&a, &b| {
                let (ra, rb) = (&resources[a], &resources[b]);
                ra.action
                    .severity_rank()
                    .cmp(&rb.action.severity_rank())
                    .then_with(|| ra.address.cmp(&rb.address))
            }),
            Self::ByAddress => {
                indices.sort_by(|&a, &b| resources[a].address.cmp(&resources[b].address));
            }
            Self::ByType => indices.sort_by(|&a, &b| {
                let (ra, rb) = (&resources[a], &resources[b]);
                ra.resource_type
                    .cmp(&rb.resource_type)
                    .then_with(|| ra.address.cmp(&rb.address))
            }),
        }
    }
}
