use cwscript_dsl::{tokenize, Token};

use crate::cli::{GlobalOpts, TokensArgs};
use crate::commands::read_source;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

fn token_json(token: &Token) -> serde_json::Value {
    serde_json::json!({
        "kind": token.kind.description(),
        "text": token.text,
        "line": token.line,
        "column": token.column,
        "span": [token.span.start, token.span.end],
    })
}

/// Run the `tokens` command: one line per token.
pub fn run(args: TokensArgs, _global: &GlobalOpts, output: &OutputContext) -> Result<(), CliError> {
    let source = read_source(&args.file)?;
    let tokens: Vec<Token> = tokenize(&source)
        .into_iter()
        .filter(|t| args.all || !t.is_trivia())
        .collect();

    match output.mode {
        OutputMode::Json => {
            let list: Vec<serde_json::Value> = tokens.iter().map(token_json).collect();
            output.print_json(&serde_json::Value::Array(list));
        }
        OutputMode::Plain => {
            for token in &tokens {
                println!(
                    "{}\t{}\t{}\t{:?}",
                    token.line,
                    token.column,
                    token.kind.description(),
                    token.text
                );
            }
        }
        OutputMode::Human => {
            for token in &tokens {
                println!("{token}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_json_fields() {
        let tokens = tokenize("foo = 1");
        let json = token_json(&tokens[0]);
        assert_eq!(json["kind"], "identifier");
        assert_eq!(json["text"], "foo");
        assert_eq!(json["line"], 1);
        assert_eq!(json["column"], 1);
        assert_eq!(json["span"][1], 3);
    }
}
