//! Unification algorithm for type inference.
//!
//! Structural unification over constructor terms, with an occurs check.
//! A failed unification leaves the substitution exactly as it was.

use crate::error::TypeError;
use crate::lexer::Span;
use crate::types::{PrettyContext, TVar, TVarId, Type};

use super::state::InferState;

/// Result type for unification.
pub type UnifyResult<T> = Result<T, TypeError>;

/// Every substitution entry written during one `unify` call, with the
/// value it replaced.
type Trail = Vec<(TVarId, Option<Type>)>;

impl InferState {
    /// Unify two types, updating the substitution.
    ///
    /// On failure the substitution is rolled back, so no partial bindings
    /// from the failed attempt survive.
    pub fn unify(&mut self, span: Span, t1: &Type, t2: &Type) -> UnifyResult<()> {
        let mut trail = Trail::new();
        let result = self.unify_impl(span, t1, t2, &mut trail);
        if result.is_err() {
            self.undo(trail);
        }
        result.map_err(|err| match err {
            // Report the whole terms, not the innermost mismatching pair
            TypeError::UnificationError { .. } => self.unification_error(span, t1, t2),
            other => other,
        })
    }

    fn unify_impl(
        &mut self,
        span: Span,
        t1: &Type,
        t2: &Type,
        trail: &mut Trail,
    ) -> UnifyResult<()> {
        let t1 = self.find(t1, trail);
        let t2 = self.find(t2, trail);

        match (&t1, &t2) {
            // Same variable
            (Type::Var(v1), Type::Var(v2)) if v1 == v2 => Ok(()),

            // The second variable joins the first one's class
            (Type::Var(_), Type::Var(var)) => self.var_bind(span, *var, &t1, trail),

            (Type::Var(var), t) | (t, Type::Var(var)) => self.var_bind(span, *var, t, trail),

            (
                Type::Con {
                    name: n1,
                    params: p1,
                },
                Type::Con {
                    name: n2,
                    params: p2,
                },
            ) => {
                if n1 != n2 || p1.len() != p2.len() {
                    return Err(self.unification_error(span, &t1, &t2));
                }
                for (a, b) in p1.iter().zip(p2.iter()) {
                    self.unify_impl(span, a, b, trail)?;
                }
                Ok(())
            }
        }
    }

    /// Follow variable bindings to the first unbound variable or
    /// constructor, pointing every variable passed on the way straight at
    /// the result.
    fn find(&mut self, ty: &Type, trail: &mut Trail) -> Type {
        let mut current = ty.clone();
        let mut path = Vec::new();
        while let Type::Var(var) = &current {
            let Some(next) = self.subst.get(var.id) else {
                break;
            };
            path.push(var.id);
            current = next.clone();
        }

        // The last variable on the path already points at `current`
        if let Some((_, rest)) = path.split_last() {
            for &id in rest {
                let old = self.subst.insert(id, current.clone());
                trail.push((id, old));
            }
        }
        current
    }

    fn occurs(&mut self, id: TVarId, ty: &Type, trail: &mut Trail) -> bool {
        match self.find(ty, trail) {
            Type::Var(var) => var.id == id,
            Type::Con { params, .. } => params.iter().any(|p| self.occurs(id, p, trail)),
        }
    }

    /// Bind a type variable to a type (with occurs check).
    fn var_bind(
        &mut self,
        span: Span,
        var: TVar,
        ty: &Type,
        trail: &mut Trail,
    ) -> UnifyResult<()> {
        if self.occurs(var.id, ty, trail) {
            let mut ctx = PrettyContext::new();
            return Err(TypeError::OccursCheck {
                var: ctx.format_type(&Type::Var(var)),
                ty: ctx.format_type(&self.apply_subst(ty)),
                span,
                context: None,
            });
        }

        let old = self.subst.insert(var.id, ty.clone());
        trail.push((var.id, old));
        Ok(())
    }

    fn undo(&mut self, trail: Trail) {
        for (id, old) in trail.into_iter().rev() {
            match old {
                Some(ty) => self.subst.insert(id, ty),
                None => self.subst.remove(id),
            };
        }
    }

    /// Build a unification error, printing both sides in one naming context.
    fn unification_error(&self, span: Span, expected: &Type, found: &Type) -> TypeError {
        let mut ctx = PrettyContext::new();
        TypeError::UnificationError {
            expected: ctx.format_type(&self.apply_subst(expected)),
            found: ctx.format_type(&self.apply_subst(found)),
            span,
            context: None,
        }
    }
}
