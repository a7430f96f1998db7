//! Your first edn-codec experience: read edn text into native values,
//! poke at them, and write them back out.
//!
//! Run with: `cargo run --example simple`

use edn_codec::{dumps, loads, Edn};

fn main() -> edn_codec::Result<()> {
    let text = r#"{:name "Alice"
                   :age 30
                   :roles #{:admin :user}
                   :scores [95 87 100]
                   :manager nil}"#;

    let value = loads(text)?;

    println!("name:    {:?}", value.get(&Edn::keyword("name")).and_then(Edn::as_str));
    println!("age:     {:?}", value.get(&Edn::keyword("age")).and_then(Edn::as_i64));
    println!("manager: {:?}", value.get(&Edn::keyword("manager")));

    // Build a value programmatically and print it as edn.
    let reply = edn_codec::edn!({
        "status" => "ok",
        "ids" => [1, 2, 3],
    });
    println!("reply:   {}", dumps(&reply)?);

    Ok(())
}
