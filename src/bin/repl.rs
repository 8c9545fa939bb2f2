use std::io::{self, BufRead, Write};

// An expression may span several lines; a blank line rolls it.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut buf = String::new();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        if line.trim().is_empty() {
            if !buf.is_empty() {
                match dice_expr::roll(&buf) {
                    Ok(r) => println!("{}", r),
                    Err(why) => eprintln!("Error: {}", why),
                }
            }
            print!("> ");
            io::stdout().flush()?;
            buf.clear();
        } else {
            buf.push_str(&line);
            buf.push('\n');
            print!("... ");
            io::stdout().flush()?;
        }
    }
    Ok(())
}
