use rand::prelude::Distribution;
use rand::Rng;

static RANDOM_SYMBOLS: [&str; 12] = [
    "alpha", "beta", "gamma", "pi", "leq", "geq", "infty", "sum", "int", "cdot", "times", "partial",
];

static RANDOM_COMMANDS: [(&str, usize); 5] = [
    ("frac", 2),
    ("binom", 2),
    ("sqrt", 1),
    ("dfrac", 2),
    ("tfrac", 2),
];

pub struct Weights {
    pub space: u32,
    pub comment: u32,
    pub identifier: u32,
    pub number: u32,
    pub operator: u32,
    pub bracket: u32,
    pub symbol: u32,
    pub command: u32,
    pub text: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            space: 50,
            comment: 1,
            identifier: 100,
            number: 50,
            operator: 60,
            bracket: 20,
            symbol: 30,
            command: 10,
            text: 5,
        }
    }
}

/// Generates random, valid math source of approximately the provided length.
pub fn generate_random_math(
    rng: &mut rand::prelude::StdRng,
    num_chars: usize,
    max_depth: usize,
    weights: &Weights,
) -> String {
    let mut result = String::with_capacity(num_chars + 100);
    result.push_str("% This math source was randomly generated by the Texcraft project.\n");
    while result.len() < num_chars {
        push_random_atom(rng, &mut result, max_depth, weights);
    }
    result
}

fn push_random_atom(
    rng: &mut rand::prelude::StdRng,
    result: &mut String,
    depth: usize,
    weights: &Weights,
) {
    let dist = rand::distributions::WeightedIndex::new([
        weights.space,
        weights.comment,
        weights.identifier,
        weights.number,
        weights.operator,
        weights.bracket,
        weights.symbol,
        if depth == 0 { 0 } else { weights.command },
        weights.text,
    ])
    .unwrap();
    match dist.sample(rng) {
        0 => result.push(' '),
        1 => result.push_str("% a comment\n"),
        2 => {
            for _ in 0..rng.gen_range(1..4) {
                result.push(char::from_u32(97 + rng.gen_range(0..26)).unwrap());
            }
        }
        3 => result.push_str(&rng.gen_range(0..10000).to_string()),
        4 => result.push(['+', '-', '*', '/', '=', '^', '_', '|'][rng.gen_range(0..8)]),
        5 => result.push_str(
            [r"(", r")", r"[", r"]", r"\left(", r"\right)", r"\left\{", r"\right\}"]
                [rng.gen_range(0..8)],
        ),
        6 => {
            result.push('\\');
            result.push_str(RANDOM_SYMBOLS[rng.gen_range(0..RANDOM_SYMBOLS.len())]);
            result.push(' ');
        }
        7 => {
            let (name, num_args) = RANDOM_COMMANDS[rng.gen_range(0..RANDOM_COMMANDS.len())];
            result.push('\\');
            result.push_str(name);
            for _ in 0..num_args {
                result.push('{');
                for _ in 0..rng.gen_range(1..5) {
                    push_random_atom(rng, result, depth - 1, weights);
                }
                result.push('}');
            }
        }
        _ => result.push_str(r"\text{ if and only if }"),
    }
}
