use safecalc::session::{Action, Session};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

const HELP: &str = "type an arithmetic expression, or one of
  :key <label>  press a calculator key, e.g., :key 7 or :key =
  :back         remove the last character
  :clear        reset the expression
  :history      show the last results
  :quit         exit";

fn print_history(session: &Session) {
    let mut is_empty = true;
    for entry in session.history() {
        println!("- {}", entry);
        is_empty = false;
    }
    if is_empty {
        println!("No calculations yet.");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout();
    let stdin = io::stdin();
    let mut buffer = String::new();
    let mut session = Session::default();
    println!("{}", HELP);
    loop {
        stdout.write_all(format!("[{}] > ", session.expr()).as_bytes())?;
        stdout.flush()?;
        buffer.clear();
        if stdin.lock().read_line(&mut buffer)? == 0 {
            break;
        }
        let line = buffer.trim();
        let action = match line {
            "" => continue,
            ":quit" => break,
            ":history" => {
                print_history(&session);
                continue;
            }
            ":back" => Action::Backspace,
            ":clear" => Action::Clear,
            _ => {
                if let Some(label) = line.strip_prefix(":key ") {
                    match Action::from_key(label.trim()) {
                        Some(action) => action,
                        None => {
                            eprintln!("unknown key {}", label.trim());
                            continue;
                        }
                    }
                } else if line.starts_with(':') {
                    println!("{}", HELP);
                    continue;
                } else {
                    session = session.apply(Action::SetExpr(line.to_string()));
                    Action::Evaluate
                }
            }
        };
        let is_evaluation = action == Action::Evaluate;
        session = session.apply(action);
        if is_evaluation {
            if let Some(entry) = session.history().next() {
                println!("{}", entry.rendered);
            }
        }
    }
    Ok(())
}
