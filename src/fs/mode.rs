// ── C-style open modes ────────────────────────────────────────────────────────
//
// Parses `fopen` mode strings ("r", "w+", "ab", "wx", …) into open options.
// Files are always opened in binary mode: `b` is implied and `t` is accepted
// but has no effect, so bytes on disk are exactly the bytes written.

use std::{fmt, fs::OpenOptions, str::FromStr};

use crate::error::Error;

/// The primary access mode: the first character of the mode string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// `r`: the file must exist.
    Read,
    /// `w`: create or truncate.
    Write,
    /// `a`: create, every write goes to the end.
    Append,
}

/// A parsed `fopen` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMode {
    pub access: Access,
    /// `+`: open for both reading and writing.
    pub update: bool,
    /// `x`: fail if the file already exists (only valid with `w`).
    pub exclusive: bool,
}

impl OpenMode {
    pub fn read() -> Self {
        Self {
            access: Access::Read,
            update: false,
            exclusive: false,
        }
    }

    pub fn write() -> Self {
        Self {
            access: Access::Write,
            update: false,
            exclusive: false,
        }
    }

    pub fn append() -> Self {
        Self {
            access: Access::Append,
            update: false,
            exclusive: false,
        }
    }

    /// Whether reads are permitted on the resulting handle.
    pub fn readable(&self) -> bool {
        self.access == Access::Read || self.update
    }

    /// Whether writes are permitted on the resulting handle.
    pub fn writable(&self) -> bool {
        self.access != Access::Read || self.update
    }

    /// Whether opening empties an existing file (`w` modes).
    pub fn truncates(&self) -> bool {
        self.access == Access::Write
    }

    /// Translate to std open options.
    pub fn options(&self) -> OpenOptions {
        let mut o = OpenOptions::new();
        o.read(self.readable());
        match self.access {
            Access::Read => {
                o.write(self.update);
            }
            Access::Write => {
                o.write(true).truncate(true);
                if self.exclusive {
                    o.create_new(true);
                } else {
                    o.create(true);
                }
            }
            Access::Append => {
                o.append(true).create(true);
            }
        }
        o
    }
}

impl FromStr for OpenMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| Error::InvalidInput { op: "open", reason };

        let mut chars = s.chars();
        let access = match chars.next() {
            Some('r') => Access::Read,
            Some('w') => Access::Write,
            Some('a') => Access::Append,
            Some(_) => return Err(invalid("mode must start with 'r', 'w' or 'a'")),
            None => return Err(invalid("mode string is empty")),
        };

        let mut mode = OpenMode {
            access,
            update: false,
            exclusive: false,
        };
        let (mut seen_binary, mut seen_text) = (false, false);
        for c in chars {
            match c {
                '+' if !mode.update => mode.update = true,
                'x' if !mode.exclusive && access == Access::Write => mode.exclusive = true,
                'b' if !seen_binary && !seen_text => seen_binary = true,
                't' if !seen_binary && !seen_text => seen_text = true,
                _ => return Err(invalid("unrecognised or repeated mode flag")),
            }
        }
        Ok(mode)
    }
}

/// Canonical form, always with the binary flag: `"r+b"`, `"wxb"`, …
impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self.access {
            Access::Read => 'r',
            Access::Write => 'w',
            Access::Append => 'a',
        };
        write!(f, "{c}")?;
        if self.update {
            f.write_str("+")?;
        }
        if self.exclusive {
            f.write_str("x")?;
        }
        f.write_str("b")
    }
}
