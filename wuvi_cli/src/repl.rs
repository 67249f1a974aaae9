use rustyline::Editor;

use wuvi::ast::StmtKind;
use wuvi::interpret::ExecEnv;
use wuvi::parser::Parser;

pub fn repl(debug: bool) {
    let mut rl = Editor::<()>::new();
    let mut env = ExecEnv::new();

    // If this is `Some`, the user has opened a function definition and
    // is still typing its body; otherwise, every line is run as soon
    // as it is entered.
    let mut partial: Option<String> = None;
    loop {
        match rl.readline(if partial.is_some() { ">> " } else { ":: " }) {
            Ok(readline) => {
                rl.add_history_entry(readline.as_str());
                let readline = readline.trim_end();
                let partial_data = match partial {
                    Some(lines) => lines + "\n" + readline,
                    None => readline.to_owned(),
                };

                let stmts = Parser::new(&partial_data).parse();
                if stmts.iter().any(is_open_definition) {
                    partial = Some(partial_data);
                    continue;
                }
                partial = None;

                if debug {
                    println!("{:#?}", stmts);
                }

                if let Err(e) = env.eval_stmts(&stmts) {
                    println!("{}", e);
                    if let Some(line) = partial_data.lines().nth(e.line.wrapping_sub(1)) {
                        println!(" | {}", line);
                        println!(
                            "   {}{}",
                            " ".repeat(e.span.start),
                            "^".repeat((e.span.end - e.span.start).max(1))
                        );
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("bye");
                break;
            }
            Err(rustyline::error::ReadlineError::Interrupted) => partial = None,
            Err(e) => {
                println!("Error: {:?}", e);
                break;
            }
        }
    }
}

fn is_open_definition(stmt: &wuvi::ast::Stmt) -> bool {
    matches!(
        stmt.kind,
        StmtKind::Define {
            terminated: false,
            ..
        }
    )
}
