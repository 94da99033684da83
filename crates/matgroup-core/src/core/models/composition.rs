use super::elements;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Tolerance used to decide whether an element amount is integral.
const AMOUNT_EPSILON: f64 = 1e-8;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FormulaError {
    #[error("Formula is empty")]
    Empty,

    #[error("Unexpected character '{0}' in formula")]
    UnexpectedCharacter(char),
}

/// An elemental composition: a mapping from element symbols to amounts.
///
/// Amounts are per-formula-unit element counts and need not be integral.
/// Non-positive amounts are dropped at construction, so an empty composition
/// genuinely contains no elements. The map is ordered to keep serialization
/// and iteration deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Composition {
    amounts: BTreeMap<String, f64>,
}

impl Composition {
    /// Creates an empty composition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a plain condensed formula such as `"LiFePO4"` or `"Fe2O3"`.
    ///
    /// Symbols start with an uppercase letter, amounts may be decimal, and
    /// repeated symbols accumulate. Structural notation (parentheses,
    /// hydrate dots) is not supported.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError::Empty`] for a blank input and
    /// [`FormulaError::UnexpectedCharacter`] for anything that is not an
    /// element symbol or an amount.
    pub fn from_formula(formula: &str) -> Result<Self, FormulaError> {
        let mut amounts: BTreeMap<String, f64> = BTreeMap::new();
        let mut chars = formula.chars().peekable();

        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                continue;
            }
            if !c.is_ascii_uppercase() {
                return Err(FormulaError::UnexpectedCharacter(c));
            }
            let mut symbol = String::new();
            symbol.push(c);
            chars.next();
            while let Some(&lc) = chars.peek() {
                if lc.is_ascii_lowercase() {
                    symbol.push(lc);
                    chars.next();
                } else {
                    break;
                }
            }
            let mut digits = String::new();
            while let Some(&dc) = chars.peek() {
                if dc.is_ascii_digit() || dc == '.' {
                    digits.push(dc);
                    chars.next();
                } else {
                    break;
                }
            }
            let amount = if digits.is_empty() {
                1.0
            } else {
                digits
                    .parse::<f64>()
                    .map_err(|_| FormulaError::UnexpectedCharacter('.'))?
            };
            *amounts.entry(symbol).or_insert(0.0) += amount;
        }

        if amounts.is_empty() {
            return Err(FormulaError::Empty);
        }
        Ok(amounts.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Returns the amount of `symbol`, or 0.0 if absent.
    pub fn amount(&self, symbol: &str) -> f64 {
        self.amounts.get(symbol).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.amounts.contains_key(symbol)
    }

    /// Iterates over the element symbols present, in lexicographic order.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.amounts.keys().map(String::as_str)
    }

    /// Returns a copy of this composition with the given species removed.
    pub fn without(&self, species: &[String]) -> Self {
        self.amounts
            .iter()
            .filter(|(symbol, _)| !species.iter().any(|s| s == *symbol))
            .map(|(symbol, amount)| (symbol.clone(), *amount))
            .collect()
    }

    /// Returns the reduced formula of this composition.
    ///
    /// Amounts are divided by their greatest common divisor when all of them
    /// are integral, symbols are ordered by ascending electronegativity, and
    /// unit amounts are elided, so `{Fe: 4, P: 4, O: 16}` renders as
    /// `"FePO4"`. An empty composition renders as an empty string.
    pub fn reduced_formula(&self) -> String {
        let mut symbols: Vec<&str> = self.amounts.keys().map(String::as_str).collect();
        symbols.sort_by(|a, b| elements::formula_order(a, b));

        let factor = self.integral_gcd().unwrap_or(1) as f64;
        let mut formula = String::new();
        for symbol in symbols {
            formula.push_str(symbol);
            let amount = self.amounts[symbol] / factor;
            if (amount - 1.0).abs() > AMOUNT_EPSILON {
                if (amount - amount.round()).abs() < AMOUNT_EPSILON {
                    formula.push_str(&(amount.round() as u64).to_string());
                } else {
                    formula.push_str(&amount.to_string());
                }
            }
        }
        formula
    }

    /// Greatest common divisor of the amounts, when every amount is integral.
    fn integral_gcd(&self) -> Option<u64> {
        let mut result: u64 = 0;
        for amount in self.amounts.values() {
            if (amount - amount.round()).abs() > AMOUNT_EPSILON {
                return None;
            }
            result = gcd(result, amount.round() as u64);
        }
        (result > 0).then_some(result)
    }
}

impl FromIterator<(String, f64)> for Composition {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            amounts: iter
                .into_iter()
                .filter(|(_, amount)| *amount > 0.0)
                .collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, f64)> for Composition {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(symbol, amount)| (symbol.to_string(), amount))
            .collect()
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reduced_formula())
    }
}

/// Joins a set of element symbols into a chemical-system string: the symbols
/// sorted alphabetically, deduplicated, and hyphen-joined (`"Fe-Li-O-P"`).
pub fn chemical_system<I, S>(symbols: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let set: std::collections::BTreeSet<String> = symbols
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    set.into_iter().join("-")
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}
