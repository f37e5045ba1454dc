//! Pretty-printing for types.
//!
//! Provides human-readable string representations of types. Variables are
//! renamed `a`, `b`, ... in order of first appearance within one context,
//! so two types printed through the same context agree on their names.

use std::collections::HashMap;
use std::fmt::{self, Display, Write};

use super::ty::{TVar, TVarId, Type, ARROW, PRODUCT};

/// Context for pretty-printing, tracking variable names.
pub struct PrettyContext {
    /// Mapping from type variable IDs to display names.
    var_names: HashMap<TVarId, String>,
    /// Counter for generating fresh names.
    next_name: usize,
}

impl PrettyContext {
    /// Create a new pretty-printing context.
    pub fn new() -> Self {
        PrettyContext {
            var_names: HashMap::new(),
            next_name: 0,
        }
    }

    /// Get or generate a name for a type variable.
    fn get_var_name(&mut self, id: TVarId) -> String {
        if let Some(name) = self.var_names.get(&id) {
            return name.clone();
        }

        let name = self.generate_name();
        self.var_names.insert(id, name.clone());
        name
    }

    /// Generate the next fresh variable name.
    fn generate_name(&mut self) -> String {
        let idx = self.next_name;
        self.next_name += 1;

        if idx < 26 {
            // a, b, c, ..., z
            char::from(b'a' + idx as u8).to_string()
        } else {
            // a1, b1, ..., z1, a2, ...
            let letter = char::from(b'a' + (idx % 26) as u8);
            let num = idx / 26;
            format!("{}{}", letter, num)
        }
    }

    /// Format a type to a string.
    pub fn format_type(&mut self, ty: &Type) -> String {
        let mut s = String::new();
        // Writing into a String cannot fail
        let _ = self.write_type(&mut s, ty, false);
        s
    }

    /// Write a type to the given writer.
    fn write_type<W: Write>(&mut self, w: &mut W, ty: &Type, in_arrow_param: bool) -> fmt::Result {
        match ty {
            Type::Var(var) => write!(w, "{}", self.get_var_name(var.id)),

            Type::Con { name, params } if name == ARROW && params.len() == 2 => {
                if in_arrow_param {
                    write!(w, "(")?;
                }
                match &params[0] {
                    // A product parameter list prints as `(a, b) -> r`
                    Type::Con { name, params: elems } if name == PRODUCT => {
                        self.write_list(w, elems)?;
                    }
                    other => self.write_type(w, other, true)?,
                }
                write!(w, " -> ")?;
                self.write_type(w, &params[1], false)?;
                if in_arrow_param {
                    write!(w, ")")?;
                }
                Ok(())
            }

            Type::Con { name, params } if name == PRODUCT => {
                if params.len() == 1 {
                    write!(w, "(")?;
                    self.write_type(w, &params[0], false)?;
                    write!(w, ",)")
                } else {
                    self.write_list(w, params)
                }
            }

            Type::Con { name, params } => {
                write!(w, "{}", name)?;
                if !params.is_empty() {
                    write!(w, "<")?;
                    for (i, param) in params.iter().enumerate() {
                        if i > 0 {
                            write!(w, ", ")?;
                        }
                        self.write_type(w, param, false)?;
                    }
                    write!(w, ">")?;
                }
                Ok(())
            }
        }
    }

    /// Write a parenthesized, comma-separated list of types.
    fn write_list<W: Write>(&mut self, w: &mut W, tys: &[Type]) -> fmt::Result {
        write!(w, "(")?;
        for (i, ty) in tys.iter().enumerate() {
            if i > 0 {
                write!(w, ", ")?;
            }
            self.write_type(w, ty, false)?;
        }
        write!(w, ")")
    }
}

impl Default for PrettyContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Display implementation for types using a fresh context.
impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ctx = PrettyContext::new();
        write!(f, "{}", ctx.format_type(self))
    }
}

impl Display for TVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Some(tag) => write!(f, "{}{}", tag, self.id),
            None => write!(f, "t{}", self.id),
        }
    }
}
