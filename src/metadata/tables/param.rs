use std::sync::Arc;

use crate::metadata::token::Token;

/// A reference to a `Param`
pub type ParamRc = Arc<Param>;

#[allow(non_snake_case)]
/// All possible flags for `ParamAttributes`
pub mod ParamAttributes {
    /// Parameter is an input
    pub const IN: u32 = 0x0001;
    /// Parameter is an output
    pub const OUT: u32 = 0x0002;
    /// Parameter is optional
    pub const OPTIONAL: u32 = 0x0010;
}

/// A parameter record for a method definition.
///
/// Sequence number 0 designates the return-value carrier; positional
/// parameters count from 1.
#[derive(Debug)]
pub struct Param {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// bitmask of `ParamAttributes`
    pub flags: u32,
    /// The sequence number (0 for return value)
    pub sequence: u32,
    /// The parameter name
    pub name: Option<String>,
}

impl Param {
    /// Whether the `IN` direction flag is set
    #[must_use]
    pub fn is_in(&self) -> bool {
        self.flags & ParamAttributes::IN != 0
    }

    /// Whether the `OUT` direction flag is set
    #[must_use]
    pub fn is_out(&self) -> bool {
        self.flags & ParamAttributes::OUT != 0
    }

    /// The parameter name, or an empty string for unnamed records
    #[must_use]
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_flags() {
        let p = Param {
            rid: 1,
            token: Token::new(0x08000001),
            flags: ParamAttributes::IN,
            sequence: 1,
            name: Some("value".to_string()),
        };
        assert!(p.is_in());
        assert!(!p.is_out());

        let p = Param {
            rid: 2,
            token: Token::new(0x08000002),
            flags: ParamAttributes::OUT,
            sequence: 2,
            name: None,
        };
        assert!(!p.is_in());
        assert!(p.is_out());
        assert_eq!(p.name_or_empty(), "");
    }
}
