//! Typings: the result of inferring one node.

use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};

use crate::types::{Subst, Substitutable, TVar, Type};

use super::context::Context;

/// Names declared inside a node, each with its raw (generalizable) typing.
pub type Defined = IndexMap<String, Rc<Typing>>;

/// The type of a node, the free-variable constraints beneath it, and the
/// names it declares.
#[derive(Debug, Clone, PartialEq)]
pub struct Typing {
    pub ty: Type,
    pub context: Context,
    pub defined: Defined,
}

impl Typing {
    /// A typing with no constraints and no declarations.
    pub fn new(ty: Type) -> Self {
        Typing {
            ty,
            context: Context::new(),
            defined: Defined::new(),
        }
    }

    pub fn with_context(ty: Type, context: Context) -> Self {
        Typing {
            ty,
            context,
            defined: Defined::new(),
        }
    }

    /// True when nothing beneath this node refers to a free name.
    pub fn is_closed(&self) -> bool {
        self.context.is_empty()
    }
}

impl Substitutable for Typing {
    fn apply_subst(&self, subst: &Subst) -> Self {
        Typing {
            ty: self.ty.apply_subst(subst),
            context: self.context.apply_subst(subst),
            defined: self
                .defined
                .iter()
                .map(|(name, typing)| (name.clone(), Rc::new(typing.apply_subst(subst))))
                .collect(),
        }
    }

    fn free_vars(&self) -> IndexSet<TVar> {
        let mut vars = self.ty.free_vars();
        vars.extend(self.context.free_vars());
        for typing in self.defined.values() {
            vars.extend(typing.free_vars());
        }
        vars
    }
}
