//! Streaming: read an unbounded sequence of top-level forms lazily, and
//! write a sequence back out one form per line.
//!
//! Run with: `cargo run --example streaming`

use edn_codec::{dump, load};
use std::io;

fn main() -> edn_codec::Result<()> {
    let source = "\
{:event :login :user \"alice\"}
{:event :click :x 10 :y 20} ; trailing comment
#_{:event :ignored}
{:event :logout :user \"alice\"}";

    let mut seen = Vec::new();
    for value in load(source.as_bytes()) {
        let value = value?;
        println!("read: {}", value);
        seen.push(value);
    }

    println!("--- re-emitted ---");
    dump(seen.iter(), io::stdout())?;
    Ok(())
}
