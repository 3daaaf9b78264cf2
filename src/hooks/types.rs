/// Phase of callback execution relative to the column write
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Before,
    After,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Before => "before",
            Phase::After => "after",
        }
    }
}

/// State transitions that callbacks can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HookOperation {
    SoftDestroy,
    Restore,
}

impl HookOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookOperation::SoftDestroy => "soft_destroy",
            HookOperation::Restore => "restore",
        }
    }
}
