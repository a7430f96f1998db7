//! Tagged values end to end: the built-in #inst/#uuid handlers, a custom
//! reader/writer pair for a domain type, and graceful unknown tags.
//!
//! Run with: `cargo run --example tagged_values`

use edn_codec::{dumps_with, loads, loads_with, Edn, Readers, Symbol, Writers};

fn main() -> edn_codec::Result<()> {
    // Built-ins work out of the box.
    let inst = loads("#inst \"2012-05-12T14:30:00+01:00\"")?;
    println!("instant: {:?}", inst.as_instant());

    // An unknown tag is data, not an error.
    let opaque = loads("#myapp/temperature 20")?;
    println!("opaque:  {}", opaque);

    // Give the tag meaning with a reader...
    let readers = Readers::defaults().with(Symbol::namespaced("myapp", "temperature"), |v| {
        let celsius = v.as_i64().unwrap_or(0);
        Ok(Edn::Float(celsius as f64 + 273.15))
    });
    let kelvin = loads_with("#myapp/temperature 20", &readers, None)?;
    println!("kelvin:  {}", kelvin);

    // ...and write the domain value back through a writer rule.
    let writers = Writers::defaults().with(
        |v| v.as_f64().is_some(),
        Symbol::namespaced("myapp", "temperature"),
        |v| {
            let kelvin = v.as_f64().unwrap_or(0.0);
            Ok(Edn::from((kelvin - 273.15) as i64))
        },
    );
    println!("edn:     {}", dumps_with(&kelvin, &writers, None)?);

    Ok(())
}
