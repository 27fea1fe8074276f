use crate::error::Error;
use crate::token::{Polarity, Token};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// a bag over the 8-token alphabet, stored as one saturating count
/// per token in canonical order. this (not a HashMap) is the single
/// most important performance decision in the crate: add/sub/contains
/// reduce to 8 checked array operations and the canonical encoding is
/// just the raw bytes, usable directly as a hash/equality key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Multiset([u8; 8]);

impl Multiset {
    pub const EMPTY: Multiset = Multiset([0; 8]);

    pub fn single(token: Token) -> Self {
        let mut counts = [0u8; 8];
        counts[token.index()] = 1;
        Self(counts)
    }

    pub fn from_counts(counts: [u8; 8]) -> Self {
        Self(counts)
    }

    pub fn get(&self, token: Token) -> u8 {
        self.0[token.index()]
    }

    pub fn size(&self) -> u32 {
        self.0.iter().map(|&c| c as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// true iff every token's count in `self` is >= the count in `other`.
    pub fn contains(&self, other: &Multiset) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a >= b)
    }

    pub fn add(&self, other: &Multiset) -> crate::error::Result<Multiset> {
        let mut out = [0u8; 8];
        for i in 0..8 {
            out[i] = self.0[i].checked_add(other.0[i]).ok_or_else(|| {
                Error::Internal(format!(
                    "overflow adding token {} ({} + {})",
                    Token::from(i),
                    self.0[i],
                    other.0[i]
                ))
            })?;
        }
        Ok(Multiset(out))
    }

    pub fn sub(&self, other: &Multiset) -> crate::error::Result<Multiset> {
        if !self.contains(other) {
            return Err(Error::Internal(format!(
                "underflow subtracting {other} from {self}"
            )));
        }
        let mut out = [0u8; 8];
        for i in 0..8 {
            out[i] = self.0[i] - other.0[i];
        }
        Ok(Multiset(out))
    }

    /// (negative_count, positive_count) totals.
    pub fn polarity_counts(&self) -> (u32, u32) {
        let mut neg = 0u32;
        let mut pos = 0u32;
        for token in Token::ALPHABET {
            let c = self.get(token) as u32;
            match token.polarity() {
                Polarity::Negative => neg += c,
                Polarity::Positive => pos += c,
            }
        }
        (neg, pos)
    }

    pub fn negative_count(&self) -> u32 {
        self.polarity_counts().0
    }

    pub fn positive_count(&self) -> u32 {
        self.polarity_counts().1
    }

    /// the 8 counts in fixed token order; equal multisets produce
    /// identical byte strings. used as the state key throughout the
    /// search and as the hash/equality representation.
    pub fn canonical_bytes(&self) -> [u8; 8] {
        self.0
    }

    /// true iff no token type has a nonzero count in both `self` and
    /// `other`; used both by the searcher's independent-step
    /// equivalence folding and by the scheduler's disjoint-prefix
    /// grouping.
    pub fn disjoint(&self, other: &Multiset) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| *a == 0 || *b == 0)
    }

    /// scale every count by `n`, used to build `n * SOURCE`/`n * TARGET`.
    pub fn scale(&self, n: u32) -> crate::error::Result<Multiset> {
        let mut out = [0u8; 8];
        for i in 0..8 {
            let scaled = self.0[i] as u32 * n;
            out[i] = u8::try_from(scaled).map_err(|_| {
                Error::Internal(format!(
                    "overflow scaling token {} by {n}",
                    Token::from(i)
                ))
            })?;
        }
        Ok(Multiset(out))
    }
}

impl Display for Multiset {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for token in Token::ALPHABET {
            for _ in 0..self.get(token) {
                write!(f, "{token}")?;
            }
        }
        Ok(())
    }
}

/// parses a bare or `[...]`-grouped concatenation of uppercase
/// alphabet letters, e.g. "EP", "[E][P]", "EEP". grouping brackets
/// are accepted for readability and ignored semantically.
impl FromStr for Multiset {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Error> {
        let mut counts = [0u8; 8];
        for c in s.chars() {
            if c == '[' || c == ']' || c.is_whitespace() {
                continue;
            }
            let token = Token::try_from(c)
                .map_err(|_| Error::Input(format!("'{c}' is not an alphabet token")))?;
            let slot = &mut counts[token.index()];
            *slot = slot.checked_add(1).ok_or_else(|| {
                Error::Input(format!("too many '{token}' tokens in {s:?}"))
            })?;
        }
        Ok(Multiset(counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_round_trip() {
        let a: Multiset = "EP".parse().unwrap();
        let b: Multiset = "O".parse().unwrap();
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.to_string().len(), 3);
        assert_eq!(sum.sub(&b).unwrap(), a);
    }

    #[test]
    fn sub_underflow_errors() {
        let a: Multiset = "E".parse().unwrap();
        let b: Multiset = "EE".parse().unwrap();
        assert!(a.sub(&b).is_err());
    }

    #[test]
    fn contains_is_pointwise_ge() {
        let a: Multiset = "EEP".parse().unwrap();
        let b: Multiset = "EP".parse().unwrap();
        assert!(a.contains(&b));
        assert!(!b.contains(&a));
    }

    #[test]
    fn polarity_counts_match_alphabet_partition() {
        let m: Multiset = "EGLO".parse().unwrap();
        assert_eq!(m.polarity_counts(), (2, 2));
    }

    #[test]
    fn canonical_bytes_ignore_input_order() {
        let a: Multiset = "EP".parse().unwrap();
        let b: Multiset = "PE".parse().unwrap();
        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn display_uses_canonical_alphabet_order() {
        let m: Multiset = "PE".parse().unwrap();
        assert_eq!(m.to_string(), "EP");
    }

    #[test]
    fn parse_rejects_non_alphabet() {
        assert!("EA".parse::<Multiset>().is_err());
    }

    #[test]
    fn parse_ignores_grouping_brackets_and_whitespace() {
        let a: Multiset = "[E][P]".parse().unwrap();
        let b: Multiset = " E P ".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_is_empty() {
        assert!(Multiset::EMPTY.is_empty());
        assert_eq!(Multiset::EMPTY.size(), 0);
    }

    #[test]
    fn disjoint_checks_no_shared_token_type() {
        let a: Multiset = "EO".parse().unwrap();
        let b: Multiset = "LP".parse().unwrap();
        assert!(a.disjoint(&b));
        let c: Multiset = "EG".parse().unwrap();
        assert!(!a.disjoint(&c));
    }

    #[test]
    fn scale_multiplies_every_count() {
        let m: Multiset = "EP".parse().unwrap();
        let scaled = m.scale(3).unwrap();
        assert_eq!(scaled.size(), 6);
        assert_eq!(scaled.get(Token::E), 3);
    }
}
