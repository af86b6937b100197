//! Control-flow metadata emitted per instruction.

/// How execution may leave an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BranchKind {
    /// Environment call into the execution environment.
    SystemCall,
    /// Trap (breakpoint or other exception).
    ExceptionBranch,
    /// Jump through a register; target unknown statically.
    IndirectBranch,
    /// Taken side of a conditional branch.
    TrueBranch,
    /// Not-taken side of a conditional branch.
    FalseBranch,
    /// Jump-and-link destination.
    CallDestination,
}

impl BranchKind {
    /// Returns the name of this edge kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SystemCall => "syscall",
            Self::ExceptionBranch => "exception",
            Self::IndirectBranch => "indirect",
            Self::TrueBranch => "true",
            Self::FalseBranch => "false",
            Self::CallDestination => "call",
        }
    }
}

/// A single control-flow edge candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Branch {
    pub kind: BranchKind,
    pub target: Option<u64>,
}

impl Branch {
    /// Creates an edge without a static target.
    pub fn new(kind: BranchKind) -> Self {
        Self { kind, target: None }
    }

    /// Creates an edge to a known address.
    pub fn to(kind: BranchKind, target: u64) -> Self {
        Self {
            kind,
            target: Some(target),
        }
    }
}

/// Length and outgoing edges of one instruction.
///
/// An empty edge list means execution falls through to `address + length`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstructionInfo {
    pub length: usize,
    pub branches: Vec<Branch>,
}

impl InstructionInfo {
    /// Creates info for an instruction of `length` bytes with no edges.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            branches: Vec::new(),
        }
    }

    /// Adds an edge.
    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.branches.push(branch);
        self
    }

    /// Returns true if the instruction only falls through.
    pub fn is_sequential(&self) -> bool {
        self.branches.is_empty()
    }

    /// Returns the target of the first edge of `kind`, if any.
    pub fn target_of(&self, kind: BranchKind) -> Option<u64> {
        self.branches
            .iter()
            .find(|b| b.kind == kind)
            .and_then(|b| b.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let info = InstructionInfo::new(4)
            .with_branch(Branch::to(BranchKind::TrueBranch, 0x2000))
            .with_branch(Branch::to(BranchKind::FalseBranch, 0x2004));
        assert!(!info.is_sequential());
        assert_eq!(info.target_of(BranchKind::FalseBranch), Some(0x2004));
        assert_eq!(info.target_of(BranchKind::SystemCall), None);
        assert!(InstructionInfo::new(4).is_sequential());
        assert_eq!(Branch::new(BranchKind::IndirectBranch).target, None);
        assert_eq!(BranchKind::CallDestination.name(), "call");
    }
}
