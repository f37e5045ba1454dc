//! Pretty printer for AST -> letpoly source code.

use std::fmt::{self, Write};

use super::ast::*;

/// Pretty print an expression or statement to letpoly source.
pub fn print_node(node: &Node) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_node(&mut out, node, 0);
    out
}

/// Pretty print a top-level block as a program, one statement per line.
pub fn print_program(program: &Node) -> String {
    let mut out = String::new();
    match &program.kind {
        NodeKind::Block(statements) => {
            for stmt in statements {
                let _ = write_stmt(&mut out, stmt, 0);
                out.push('\n');
            }
        }
        _ => {
            let _ = write_stmt(&mut out, program, 0);
            out.push('\n');
        }
    }
    out
}

fn write_node(w: &mut impl Write, node: &Node, indent: usize) -> fmt::Result {
    match &node.kind {
        NodeKind::Int(n) => write!(w, "{}", n),

        NodeKind::Var(name) => write!(w, "{}", name),

        NodeKind::Tuple(elements) => {
            write!(w, "(")?;
            write_list(w, elements, indent)?;
            if elements.len() == 1 {
                write!(w, ",")?;
            }
            write!(w, ")")
        }

        NodeKind::Array(elements) => {
            write!(w, "[")?;
            write_list(w, elements, indent)?;
            write!(w, "]")
        }

        NodeKind::Apply { fun, arg } => {
            // A function literal in call position would swallow the call
            let wrap = matches!(fun.kind, NodeKind::Fn { .. });
            if wrap {
                write!(w, "(")?;
            }
            write_node(w, fun, indent)?;
            if wrap {
                write!(w, ")")?;
            }
            write!(w, "(")?;
            match &arg.kind {
                NodeKind::Tuple(args) => write_list(w, args, indent)?,
                _ => write_node(w, arg, indent)?,
            }
            write!(w, ")")
        }

        NodeKind::Fn { params, body } => {
            write!(w, "fn({}) ", params.join(", "))?;
            write_node(w, body, indent)
        }

        NodeKind::Block(statements) => {
            if statements.is_empty() {
                return write!(w, "{{}}");
            }
            writeln!(w, "{{")?;
            for stmt in statements {
                write!(w, "{}", "  ".repeat(indent + 1))?;
                write_stmt(w, stmt, indent + 1)?;
                writeln!(w)?;
            }
            write!(w, "{}}}", "  ".repeat(indent))
        }

        NodeKind::Decl { name, value } => {
            write!(w, "let {} = ", name)?;
            write_node(w, value, indent)
        }

        NodeKind::Assign { name, value } => {
            write!(w, "{} = ", name)?;
            write_node(w, value, indent)
        }

        NodeKind::Return(value) => {
            write!(w, "return ")?;
            write_node(w, value, indent)
        }
    }
}

fn write_stmt(w: &mut impl Write, stmt: &Node, indent: usize) -> fmt::Result {
    write_node(w, stmt, indent)?;
    write!(w, ";")
}

fn write_list(w: &mut impl Write, nodes: &[Node], indent: usize) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            write!(w, ", ")?;
        }
        write_node(w, node, indent)?;
    }
    Ok(())
}
