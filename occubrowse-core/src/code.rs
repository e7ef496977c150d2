use std::fmt;

/// Level of a group in the four-level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupLevel {
    Major,
    SubMajor,
    Minor,
    Unit,
}

impl GroupLevel {
    pub const ALL: [GroupLevel; 4] = [
        GroupLevel::Major,
        GroupLevel::SubMajor,
        GroupLevel::Minor,
        GroupLevel::Unit,
    ];

    /// Number of code characters that identify a group at this level
    pub fn code_len(self) -> usize {
        match self {
            GroupLevel::Major => 1,
            GroupLevel::SubMajor => 2,
            GroupLevel::Minor => 3,
            GroupLevel::Unit => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GroupLevel::Major => "major group",
            GroupLevel::SubMajor => "sub-major group",
            GroupLevel::Minor => "minor group",
            GroupLevel::Unit => "unit group",
        }
    }
}

impl fmt::Display for GroupLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Group prefixes of a hierarchical code.
///
/// Only the part before the first `.` takes part. Slicing is by character and
/// performs no digit validation, so `"A1"` yields the prefixes `"A"` and `"A1"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodePrefixes<'a> {
    prefixes: Vec<&'a str>,
}

impl<'a> CodePrefixes<'a> {
    pub fn parse(code: &'a str) -> Self {
        let stem = code.split('.').next().unwrap_or_default();

        let prefixes = stem
            .char_indices()
            .skip(1)
            .map(|(idx, _)| idx)
            .chain(std::iter::once(stem.len()))
            .take(GroupLevel::ALL.len())
            .filter(|&end| end > 0)
            .map(|end| &stem[..end])
            .collect();

        Self { prefixes }
    }

    pub fn get(&self, level: GroupLevel) -> Option<&'a str> {
        self.prefixes.get(level.code_len() - 1).copied()
    }

    pub fn major(&self) -> Option<&'a str> {
        self.get(GroupLevel::Major)
    }

    pub fn sub_major(&self) -> Option<&'a str> {
        self.get(GroupLevel::SubMajor)
    }

    pub fn minor(&self) -> Option<&'a str> {
        self.get(GroupLevel::Minor)
    }

    pub fn unit(&self) -> Option<&'a str> {
        self.get(GroupLevel::Unit)
    }

    /// The deepest prefix present, with its level
    pub fn deepest(&self) -> Option<(GroupLevel, &'a str)> {
        self.iter().last()
    }

    /// Prefixes from major downwards
    pub fn iter(&self) -> impl Iterator<Item = (GroupLevel, &'a str)> + '_ {
        GroupLevel::ALL.iter().copied().zip(self.prefixes.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
