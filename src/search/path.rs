use crate::recipe::Recipe;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

/// an ordered sequence of recipe applications transforming
/// `SOURCE+C` into `TARGET+C`. compared first by length, then by
/// canonical serialization, matching §3's ordering contract and
/// giving the solver a total order to sort/dedup its output by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<Recipe>);

impl Path {
    pub fn new(steps: Vec<Recipe>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[Recipe] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", rendered.join(" | "))
    }
}

impl PartialOrd for Path {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Path {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.to_string().cmp(&other.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiset::Multiset;

    fn recipe(inputs: &str, outputs: &str) -> Recipe {
        Recipe::new(inputs.parse::<Multiset>().unwrap(), outputs.parse::<Multiset>().unwrap()).unwrap()
    }

    #[test]
    fn empty_path_displays_as_empty_string() {
        let path = Path::new(Vec::new());
        assert_eq!(path.to_string(), "");
        assert!(path.is_empty());
    }

    #[test]
    fn displays_steps_joined_by_pipe() {
        let path = Path::new(vec![recipe("EO", "LG"), recipe("PG", "XO")]);
        assert_eq!(path.to_string(), "EO -> GL | GP -> OX");
    }

    #[test]
    fn shorter_path_sorts_first() {
        let short = Path::new(vec![recipe("EO", "LG")]);
        let long = Path::new(vec![recipe("EO", "LG"), recipe("PG", "XO")]);
        assert!(short < long);
    }

    #[test]
    fn equal_length_paths_order_by_text() {
        let a = Path::new(vec![recipe("EO", "LG")]);
        let b = Path::new(vec![recipe("PG", "XO")]);
        assert!(a < b);
    }
}
