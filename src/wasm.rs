//! WebAssembly bindings for the letpoly type checker.

use wasm_bindgen::prelude::*;

use crate::check::{check_source, CheckOptions};
use crate::lexer::Span;

/// Result of type checking, read from JS through getters.
#[wasm_bindgen]
pub struct CheckResult {
    success: bool,
    output: String,
    program_type: String,
    errors: Vec<JsValue>,
}

#[wasm_bindgen]
impl CheckResult {
    #[wasm_bindgen(getter)]
    pub fn success(&self) -> bool {
        self.success
    }

    /// One `let name: type` line per declaration.
    #[wasm_bindgen(getter)]
    pub fn output(&self) -> String {
        self.output.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn program_type(&self) -> String {
        self.program_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn errors(&self) -> Vec<JsValue> {
        self.errors.clone()
    }
}

/// Format an error into a `{ message, start, end }` object for JS.
fn format_error(message: String, span: Span) -> JsValue {
    let obj = js_sys::Object::new();
    // Setting a property on a fresh plain object cannot fail
    let _ = js_sys::Reflect::set(&obj, &"message".into(), &message.into());
    let _ = js_sys::Reflect::set(&obj, &"start".into(), &JsValue::from_f64(span.start as f64));
    let _ = js_sys::Reflect::set(&obj, &"end".into(), &JsValue::from_f64(span.end as f64));
    obj.into()
}

/// Initialize the WASM module (call once at startup).
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Type check source code with the builtin prelude and return the result.
#[wasm_bindgen]
pub fn check_types(source: &str) -> CheckResult {
    match check_source(source, &CheckOptions::default()) {
        Ok(checked) => {
            let output = checked
                .decorations()
                .iter()
                .map(|d| format!("let {}: {}\n", d.name, d.ty))
                .collect();

            CheckResult {
                success: checked.is_ok(),
                output,
                program_type: checked.program_type(),
                errors: checked
                    .problems
                    .iter()
                    .map(|p| format_error(p.to_string(), p.span()))
                    .collect(),
            }
        }
        Err(e) => CheckResult {
            success: false,
            output: String::new(),
            program_type: String::new(),
            errors: vec![format_error(e.to_string(), e.span())],
        },
    }
}
