//! The fixed table of named functions a formula may call.

use std::fmt;
use std::str::FromStr;

/// One of the one-argument real functions available to formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    /// Natural logarithm
    Log,
    Exp,
    Sqrt,
    Abs,
}

impl BuiltinFunction {
    /// Every builtin, in table order.
    pub const ALL: [BuiltinFunction; 10] = [
        BuiltinFunction::Sin,
        BuiltinFunction::Cos,
        BuiltinFunction::Tan,
        BuiltinFunction::Asin,
        BuiltinFunction::Acos,
        BuiltinFunction::Atan,
        BuiltinFunction::Log,
        BuiltinFunction::Exp,
        BuiltinFunction::Sqrt,
        BuiltinFunction::Abs,
    ];

    /// Name as written in a formula
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinFunction::Sin => "sin",
            BuiltinFunction::Cos => "cos",
            BuiltinFunction::Tan => "tan",
            BuiltinFunction::Asin => "asin",
            BuiltinFunction::Acos => "acos",
            BuiltinFunction::Atan => "atan",
            BuiltinFunction::Log => "log",
            BuiltinFunction::Exp => "exp",
            BuiltinFunction::Sqrt => "sqrt",
            BuiltinFunction::Abs => "abs",
        }
    }

    /// Resolve a callee name. Names are case-sensitive.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Number of arguments the function takes.
    pub const fn arity(self) -> usize {
        1
    }

    /// Apply the function to its argument.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            BuiltinFunction::Sin => x.sin(),
            BuiltinFunction::Cos => x.cos(),
            BuiltinFunction::Tan => x.tan(),
            BuiltinFunction::Asin => x.asin(),
            BuiltinFunction::Acos => x.acos(),
            BuiltinFunction::Atan => x.atan(),
            BuiltinFunction::Log => x.ln(),
            BuiltinFunction::Exp => x.exp(),
            BuiltinFunction::Sqrt => x.sqrt(),
            BuiltinFunction::Abs => x.abs(),
        }
    }

    /// Comma-separated list of all names, for help messages.
    pub fn names() -> String {
        Self::ALL.map(Self::name).join(", ")
    }
}

impl fmt::Display for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown function name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown function \"{0}\"")]
pub struct UnknownFunction(pub String);

impl FromStr for BuiltinFunction {
    type Err = UnknownFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| UnknownFunction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_every_name() {
        for function in BuiltinFunction::ALL {
            assert_eq!(BuiltinFunction::lookup(function.name()), Some(function));
            assert_eq!(function.arity(), 1);
        }
        assert_eq!(BuiltinFunction::lookup("Sin"), None);
        assert_eq!(BuiltinFunction::lookup("ln"), None);
    }

    #[test]
    fn test_apply() {
        assert_eq!(BuiltinFunction::Abs.apply(-2.5), 2.5);
        assert_eq!(BuiltinFunction::Sqrt.apply(9.0), 3.0);
        assert_eq!(BuiltinFunction::Log.apply(1.0), 0.0);
        assert!(BuiltinFunction::Sqrt.apply(-1.0).is_nan());
        assert!((BuiltinFunction::Sin.apply(std::f64::consts::FRAC_PI_2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("atan".parse::<BuiltinFunction>(), Ok(BuiltinFunction::Atan));
        let err = "foo".parse::<BuiltinFunction>().unwrap_err();
        assert_eq!(err.to_string(), "unknown function \"foo\"");
    }

    #[test]
    fn test_names() {
        assert_eq!(
            BuiltinFunction::names(),
            "sin, cos, tan, asin, acos, atan, log, exp, sqrt, abs"
        );
    }
}
