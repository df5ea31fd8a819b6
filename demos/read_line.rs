//! Index a text file and read a given line directly

use line_index::{FileAccessor, IndexBuilder, Indexable, LineReader, ReadByLine};

fn main() {
    let path = std::env::args().nth(1).expect("usage: read_line <file> [line]");
    let line: i64 = std::env::args()
        .nth(2)
        .map(|l| l.parse().expect("line must be a number"))
        .unwrap_or(0);

    // Scan the file once
    let reader = LineReader::build(FileAccessor::new(path), &IndexBuilder::default()).unwrap();

    // Get line count without reading the file again
    println!("{} lines", reader.total_lines());

    match reader.read_line(line) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("{}", e),
    }
}
