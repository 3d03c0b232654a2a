//! Change actions and their display metadata.

use serde::{Deserialize, Serialize};

/// The kind of change proposed for a resource or attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Create,
    Destroy,
    Update,
    Replace,
    Read,
    NoOp,
    /// Create the replacement first, then destroy the old object (`+/-`)
    CreateDelete,
    /// Destroy the old object first, then create the replacement (`-/+`)
    DeleteCreate,
}

impl Action {
    /// Actions that can be toggled in the status filter, in picker order.
    pub const FILTERABLE: [Self; 7] = [
        Self::Create,
        Self::Destroy,
        Self::Update,
        Self::Replace,
        Self::Read,
        Self::DeleteCreate,
        Self::CreateDelete,
    ];

    /// Ordering used by the by-action sort, most constructive first.
    #[must_use]
    pub const fn severity_rank(self) -> u8 {
        match self {
            Self::Create => 0,
            Self::Read => 1,
            Self::Update => 2,
            Self::Replace => 3,
            Self::DeleteCreate => 4,
            Self::CreateDelete => 5,
            Self::Destroy => 6,
            Self::NoOp => 7,
        }
    }

    /// Single-character marker shown before an address.
    ///
    /// The two replacement orderings share the replace marker.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Create => "+",
            Self::Destroy => "-",
            Self::Update => "~",
            Self::Replace | Self::DeleteCreate | Self::CreateDelete => "±",
            Self::Read => "≤",
            Self::NoOp => " ",
        }
    }

    /// Phrase used after the address, as terraform itself words it.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Create => "will be created",
            Self::Destroy => "will be destroyed",
            Self::Update => "will be updated in-place",
            Self::Replace => "must be replaced",
            Self::Read => "will be read",
            Self::NoOp => "no changes",
            Self::DeleteCreate => "will be destroyed and then created",
            Self::CreateDelete => "will be created and then destroyed",
        }
    }

    /// Short label for pickers and status lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Destroy => "destroy",
            Self::Update => "update",
            Self::Replace => "replace",
            Self::Read => "read",
            Self::NoOp => "no-op",
            Self::DeleteCreate => "delete-create",
            Self::CreateDelete => "create-delete",
        }
    }

    /// Whether applying this action removes an existing object.
    #[must_use]
    pub const fn is_destructive(self) -> bool {
        matches!(
            self,
            Self::Destroy | Self::Replace | Self::DeleteCreate | Self::CreateDelete
        )
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
