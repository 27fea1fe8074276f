use crate::error::{Error, Result};
use crate::multiset::Multiset;
use crate::recipe::Recipe;
use crate::schedule::{Stage, Stages};
use crate::search::Path;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// the fields of one canonical path line (§6), either produced for
/// display or recovered from text by [`parse_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub source: Multiset,
    pub target: Multiset,
    pub repetitions: u32,
    pub catalyst: Multiset,
    pub path: Path,
}

/// renders `<SOURCE> -> <TARGET> [xN] [+ <CATALYST>] => <step> [| <step>]*`.
pub fn format_line(
    source: &Multiset,
    target: &Multiset,
    repetitions: u32,
    catalyst: &Multiset,
    path: &Path,
) -> String {
    let mut out = format!("{source} -> {target}");
    if repetitions != 1 {
        out.push_str(&format!(" x{repetitions}"));
    }
    if !catalyst.is_empty() {
        out.push_str(&format!(" + {catalyst}"));
    }
    out.push_str(" => ");
    out.push_str(&path.to_string());
    out
}

/// parses a line of the §6 canonical path grammar. this is the one
/// place in the crate that touches untrusted text; every failure
/// mode is `Error::Input` naming the offending fragment.
pub fn parse_line(line: &str) -> Result<ParsedLine> {
    let (head, body) = line
        .split_once("=>")
        .ok_or_else(|| Error::Input(format!("missing '=>' in path line {line:?}")))?;
    let (source_text, rest) = head
        .split_once("->")
        .ok_or_else(|| Error::Input(format!("missing '->' in path line {line:?}")))?;

    let mut repetitions = 1u32;
    let mut catalyst = Multiset::EMPTY;
    let mut tokens = rest.split_whitespace();
    let target_text = tokens
        .next()
        .ok_or_else(|| Error::Input(format!("missing target multiset in {line:?}")))?;
    while let Some(token) = tokens.next() {
        if let Some(count) = token.strip_prefix('x') {
            repetitions = count
                .parse()
                .map_err(|_| Error::Input(format!("malformed repetition count {token:?}")))?;
        } else if token == "+" {
            let catalyst_text = tokens
                .next()
                .ok_or_else(|| Error::Input(format!("missing catalyst after '+' in {line:?}")))?;
            catalyst = catalyst_text.parse()?;
        } else {
            return Err(Error::Input(format!(
                "unexpected token {token:?} before '=>' in {line:?}"
            )));
        }
    }

    let source: Multiset = source_text.trim().parse()?;
    let target: Multiset = target_text.trim().parse()?;
    let path = parse_steps(body.trim())?;

    Ok(ParsedLine {
        source,
        target,
        repetitions,
        catalyst,
        path,
    })
}

fn parse_steps(text: &str) -> Result<Path> {
    if text.is_empty() {
        return Ok(Path::new(Vec::new()));
    }
    let mut steps = Vec::new();
    for step_text in text.split('|') {
        let step_text = step_text.trim();
        if step_text.contains("//") {
            return Err(Error::Input(format!(
                "a flat path cannot represent concurrent ('//') recipes within one step: {step_text:?}"
            )));
        }
        steps.push(parse_recipe(step_text)?);
    }
    Ok(Path::new(steps))
}

fn parse_recipe(text: &str) -> Result<Recipe> {
    let (inputs, outputs) = text
        .split_once("->")
        .ok_or_else(|| Error::Input(format!("malformed recipe step {text:?}")))?;
    Recipe::new(inputs.trim().parse()?, outputs.trim().parse()?)
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let recipes: Vec<String> = self.recipes().iter().map(|r| r.to_string()).collect();
        write!(
            f,
            "[{}] + [{}] + [{}] | {}",
            self.reserved(),
            self.working(),
            self.released(),
            recipes.join(" // ")
        )
    }
}

impl Display for Stages {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for (index, stage) in self.stages().iter().enumerate() {
            writeln!(f, "  {}. {}", index + 1, stage)?;
        }
        Ok(())
    }
}
