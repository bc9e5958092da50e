use wasm_bindgen::prelude::*;
use chemeq::Equation;


// Export a `equation_io` function from Rust to JavaScript.
#[wasm_bindgen]
/// Parse and balance the input equation, returning the output
pub fn equation_io(equation: &str) -> String {
    // first char is 1 if success, 0 if error
    match Equation::parse(equation).and_then(|eq| eq.balanced()) {
        Ok(balanced) => format!("1{}", balanced),
        Err(err) => format!("0{}", err),
    }
}
