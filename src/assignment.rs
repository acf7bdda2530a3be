use crate::data::{Lit, Var, VarVec};

/// Current value of every variable, TRUE/FALSE/unassigned.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Assignment {
    values: VarVec<Option<bool>>,
}

impl Assignment {
    pub fn expand(&mut self, v: Var) {
        self.values.expand(v, None);
    }

    pub fn var_count(&self) -> usize {
        self.values.len()
    }

    /// Truth value of `lit`: the variable's value with the sign applied.
    pub fn value(&self, lit: Lit) -> Option<bool> {
        self.values[lit.var()].map(|v| v == lit.is_pos())
    }

    pub fn is_true(&self, lit: Lit) -> bool {
        self.value(lit) == Some(true)
    }

    pub fn is_false(&self, lit: Lit) -> bool {
        self.value(lit) == Some(false)
    }

    pub fn is_unassigned(&self, lit: Lit) -> bool {
        self.values[lit.var()].is_none()
    }

    /// Make `lit` true by assigning its variable.
    pub fn assign(&mut self, lit: Lit) {
        debug_assert!(self.is_unassigned(lit), "{} is already assigned", lit.var());
        self.values[lit.var()] = Some(lit.is_pos());
    }

    pub fn unassign(&mut self, lit: Lit) {
        debug_assert!(!self.is_unassigned(lit), "{} is not assigned", lit.var());
        self.values[lit.var()] = None;
    }

    /// First unassigned variable in ascending label order.
    pub fn first_unassigned(&self) -> Option<Var> {
        self.values
            .iter_with_var()
            .find(|(_, value)| value.is_none())
            .map(|(var, _)| var)
    }
}
