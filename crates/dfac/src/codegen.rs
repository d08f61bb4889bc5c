// Emits a C program running every automaton side by side over stdin.
// Each line of input is one word; at the end of a line the program reports,
// per automaton, whether the word was accepted, then resets all automata.

use std::fmt::Write;

use convert_case::{Case, Casing};
use thiserror::Error;

use crate::{Automaton, State, Symbol};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodegenError {
    #[error("automaton {0} is not deterministic")]
    NotDeterministic(String),
    #[error("automaton {name} uses symbol {symbol:?}, only printable ASCII is supported")]
    UnsupportedSymbol { name: String, symbol: Symbol },
    #[error("automata {0} and {1} map to the same C identifier {2}")]
    IdentifierClash(String, String, String),
    #[error("automaton {0} has no name")]
    Unnamed(usize),
    #[error("automaton name {0:?} is not a C identifier")]
    InvalidName(String),
    #[error("automaton {name} uses state {state}, larger than a C int can hold")]
    StateOutOfRange { name: String, state: State },
    #[error(transparent)]
    Format(#[from] std::fmt::Error),
}

// states are stored in C ints, and -1 is the sink
const MAX_C_STATE: State = i32::MAX as State;

fn c_identifier(name: &str) -> String {
    format!("state_{}", name.to_case(Case::Snake))
}

fn c_char_literal(symbol: Symbol) -> Option<String> {
    match symbol {
        '\'' => Some(r"'\''".to_string()),
        '\\' => Some(r"'\\'".to_string()),
        c if c.is_ascii_graphic() => Some(format!("'{}'", c)),
        _ => None,
    }
}

// [A-Za-z_][A-Za-z0-9_]*; names are pasted verbatim into the generated C
fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

struct Recognizer<'a> {
    automaton: &'a Automaton,
    variable: String,
    initial: State,
}

fn prepare(automata: &[Automaton]) -> Result<Vec<Recognizer<'_>>, CodegenError> {
    let mut recognizers: Vec<Recognizer<'_>> = Vec::with_capacity(automata.len());

    for (i, automaton) in automata.iter().enumerate() {
        if automaton.name().is_empty() {
            return Err(CodegenError::Unnamed(i));
        }
        if !is_c_identifier(automaton.name()) {
            return Err(CodegenError::InvalidName(automaton.name().to_string()));
        }
        if !automaton.is_deterministic() {
            return Err(CodegenError::NotDeterministic(automaton.name().to_string()));
        }
        for symbol in automaton.alphabet() {
            if c_char_literal(symbol).is_none() {
                return Err(CodegenError::UnsupportedSymbol {
                    name: automaton.name().to_string(),
                    symbol,
                });
            }
        }

        if let Some(&state) = automaton.states().iter().find(|&&s| s > MAX_C_STATE) {
            return Err(CodegenError::StateOutOfRange {
                name: automaton.name().to_string(),
                state,
            });
        }

        let variable = c_identifier(automaton.name());
        if let Some(other) = recognizers.iter().find(|r| r.variable == variable) {
            return Err(CodegenError::IdentifierClash(
                other.automaton.name().to_string(),
                automaton.name().to_string(),
                variable,
            ));
        }

        // deterministic, so exactly one initial state
        let initial = *automaton
            .initials()
            .element_at(0)
            .map_err(|_| CodegenError::NotDeterministic(automaton.name().to_string()))?;

        recognizers.push(Recognizer {
            automaton,
            variable,
            initial,
        });
    }

    Ok(recognizers)
}

/// Generates the C recognizer for `automata`, which must all be deterministic,
/// named with C identifiers, labeled with printable ASCII symbols, and use
/// states no larger than `i32::MAX`.
pub fn generate_c(automata: &[Automaton]) -> Result<String, CodegenError> {
    let recognizers = prepare(automata)?;
    let mut out = String::new();

    emit(&mut out, &recognizers)?;
    Ok(out)
}

fn emit(out: &mut String, recognizers: &[Recognizer<'_>]) -> std::fmt::Result {
    writeln!(out, "#include <stdio.h>")?;
    writeln!(out)?;
    writeln!(out, "int main(void) {{")?;
    writeln!(out, "  int c;")?;
    writeln!(out)?;
    writeln!(out, "  // current state of each automaton, -1 once stuck")?;
    for r in recognizers {
        writeln!(out, "  int {} = {};", r.variable, r.initial)?;
    }
    writeln!(out)?;
    writeln!(out, "  while ((c = fgetc(stdin)) != EOF) {{")?;

    for r in recognizers {
        let name = r.automaton.name();
        let accepting: Vec<String> = r
            .automaton
            .finals()
            .iter()
            .map(|f| format!("{} == {}", r.variable, f))
            .collect();
        let accepting = if accepting.is_empty() {
            "0".to_string()
        } else {
            accepting.join(" || ")
        };

        writeln!(out)?;
        writeln!(out, "    // {}", name)?;
        writeln!(out, "    if (c == '\\n') {{")?;
        writeln!(
            out,
            "      printf(\"%s by {}\\n\", ({}) ? \"accepted\" : \"rejected\");",
            name, accepting
        )?;
        writeln!(out, "      {} = {};", r.variable, r.initial)?;
        writeln!(out, "    }}")?;
        for t in r.automaton.transitions() {
            let Some(literal) = t.label().and_then(c_char_literal) else {
                continue;
            };
            writeln!(
                out,
                "    else if ({} == {} && c == {}) {} = {};",
                r.variable,
                t.start(),
                literal,
                r.variable,
                t.end()
            )?;
        }
        writeln!(out, "    else if (c != ' ' && c != '\\t') {} = -1;", r.variable)?;
    }

    writeln!(out, "  }}")?;
    writeln!(out, "  return 0;")?;
    writeln!(out, "}}")
}

#[cfg(test)]
mod codegen_tests {
    use super::*;
    use crate::DeterminizeConfig;

    fn language() -> Automaton {
        Automaton::builder("Language")
            .initial(0)
            .final_state(2)
            .transition(0, 'a', 1)
            .transition(1, 'a', 1)
            .transition(1, 'b', 2)
            .transition(2, 'b', 2)
            .build()
    }

    #[test]
    fn generates_recognizer() {
        let code = generate_c(&[language()]).expect("codegen failed");

        assert!(code.starts_with("#include <stdio.h>\n"));
        assert!(code.contains("  int state_language = 0;\n"));
        assert!(code.contains(
            "      printf(\"%s by Language\\n\", (state_language == 2) ? \"accepted\" : \"rejected\");\n"
        ));
        assert!(code.contains("    else if (state_language == 1 && c == 'b') state_language = 2;\n"));
        assert!(code.contains("    else if (c != ' ' && c != '\\t') state_language = -1;\n"));
        assert!(code.ends_with("  return 0;\n}\n"));
    }

    #[test]
    fn escapes_quote_symbols() {
        let a = Automaton::builder("Quote")
            .initial(0)
            .transition(0, '\'', 0)
            .build();
        let code = generate_c(&[a]).expect("codegen failed");
        assert!(code.contains(r"c == '\'') state_quote = 0;"));
        // no finals: never accepted
        assert!(code.contains("(0) ? \"accepted\""));
    }

    #[test]
    fn refuses_nondeterministic() {
        let a = Automaton::builder("N").initial(0).epsilon(0, 1).build();
        assert_eq!(
            generate_c(&[a]),
            Err(CodegenError::NotDeterministic("N".to_string()))
        );
    }

    #[test]
    fn refuses_non_ascii() {
        let a = Automaton::builder("U").initial(0).transition(0, 'é', 1).build();
        assert_eq!(
            generate_c(&[a]),
            Err(CodegenError::UnsupportedSymbol {
                name: "U".to_string(),
                symbol: 'é'
            })
        );
    }

    #[test]
    fn refuses_identifier_clash() {
        let a = language().with_name("FooBar");
        let b = language().with_name("foo_bar");
        assert_eq!(
            generate_c(&[a, b]),
            Err(CodegenError::IdentifierClash(
                "FooBar".to_string(),
                "foo_bar".to_string(),
                "state_foo_bar".to_string()
            ))
        );
    }

    #[test]
    fn refuses_names_that_are_not_identifiers() {
        let config = DeterminizeConfig {
            name_suffix: Some("%n\n".to_string()),
            ..Default::default()
        };
        let a = language().determinize_with(&config);
        assert_eq!(
            generate_c(&[a]),
            Err(CodegenError::InvalidName("Language%n\n".to_string()))
        );

        for name in ["1st", "has space", "quo\"te", "_ok", "Lé"] {
            let result = generate_c(&[language().with_name(name)]);
            if name == "_ok" {
                assert!(result.is_ok(), "{} should be accepted", name);
            } else {
                assert_eq!(result, Err(CodegenError::InvalidName(name.to_string())));
            }
        }
    }

    #[test]
    fn states_must_fit_in_a_c_int() {
        let a = Automaton::builder("M")
            .initial(4294967295)
            .final_state(0)
            .transition(4294967295, 'a', 0)
            .build();
        assert_eq!(
            generate_c(&[a]),
            Err(CodegenError::StateOutOfRange {
                name: "M".to_string(),
                state: 4294967295
            })
        );

        let largest = Automaton::builder("M")
            .initial(2147483647)
            .final_state(0)
            .transition(2147483647, 'a', 0)
            .build();
        let code = generate_c(&[largest]).expect("codegen failed");
        assert!(code.contains("  int state_m = 2147483647;\n"));
        assert!(code.contains("    else if (state_m == 2147483647 && c == 'a') state_m = 0;\n"));
    }
}
