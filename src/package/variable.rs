use std::fmt;
use std::str::FromStr;

/// A metadata field of a package definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageVariable {
    Name,
    Desc,
    Version,
    Source,
    Checksum,
    Deps,
    Flags,
    Notes,
}

impl PackageVariable {
    /// Key as written in the definition file (`DEPS="..."`).
    pub fn key(self) -> &'static str {
        match self {
            PackageVariable::Name => "NAME",
            PackageVariable::Desc => "DESC",
            PackageVariable::Version => "VERSION",
            PackageVariable::Source => "SOURCE",
            PackageVariable::Checksum => "CHECKSUM",
            PackageVariable::Deps => "DEPS",
            PackageVariable::Flags => "FLAGS",
            PackageVariable::Notes => "NOTES",
        }
    }
}

impl fmt::Display for PackageVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Tokens allowed in the `FLAGS` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PackageFlag {
    /// Has a 32-bit build
    X86,
    /// Has a 32-bit test suite
    X86Test,
    Test,
    /// Never removed automatically
    Important,
    Python,
    /// Work in progress
    Wip,
    Font,
    Proprietary,
}

impl PackageFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageFlag::X86 => "32bit",
            PackageFlag::X86Test => "test32",
            PackageFlag::Test => "test",
            PackageFlag::Important => "important",
            PackageFlag::Python => "python",
            PackageFlag::Wip => "wip",
            PackageFlag::Font => "font",
            PackageFlag::Proprietary => "proprietary",
        }
    }
}

impl FromStr for PackageFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "32bit" => Ok(PackageFlag::X86),
            "test32" => Ok(PackageFlag::X86Test),
            "test" => Ok(PackageFlag::Test),
            "important" => Ok(PackageFlag::Important),
            "python" => Ok(PackageFlag::Python),
            "wip" => Ok(PackageFlag::Wip),
            "font" => Ok(PackageFlag::Font),
            "proprietary" => Ok(PackageFlag::Proprietary),
            _ => Err(format!("undefined flag: {}", s)),
        }
    }
}

impl fmt::Display for PackageFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a space separated list (`DEPS`, `FLAGS`, meta-package members).
///
/// Splits on single spaces; empty tokens from repeated spaces are dropped.
pub(crate) fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(' ').filter(|token| !token.is_empty())
}
