//! Build the index once, then read lines concurrently with async-std

use line_index::async_file::{AsyncFileAccessor, AsyncLineReader};
use line_index::{FileAccessor, IndexBuilder, Indexable, LineReader};

#[async_std::main]
async fn main() {
    let path = std::env::args().nth(1).expect("usage: async_read_line <file>");

    let reader = LineReader::build(FileAccessor::new(path), &IndexBuilder::default()).unwrap();
    let reader = AsyncLineReader::<AsyncFileAccessor>::from(&reader);

    let tasks: Vec<_> = (0..reader.total_lines().min(10) as i64)
        .map(|line| {
            let reader = reader.clone();
            async_std::task::spawn(async move { (line, reader.read_line(line).await) })
        })
        .collect();

    for task in tasks {
        let (line, text) = task.await;
        println!("{}: {:?}", line, text);
    }
}
