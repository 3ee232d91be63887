use crate::sat::literal::{Literal, MAX_VARIABLES, Variable};
use core::ops::{Index, IndexMut};

/// Three valued truth of a variable under a partial assignment.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum TruthValue {
    False,
    #[default]
    Undefined,
    True,
}

impl TruthValue {
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        !matches!(self, Self::Undefined)
    }

    #[must_use]
    pub const fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }

    #[must_use]
    pub const fn from_bool(b: bool) -> Self {
        if b { Self::True } else { Self::False }
    }

    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Undefined => None,
        }
    }
}

/// The current partial assignment, one [`TruthValue`] per variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model(Vec<TruthValue>);

impl Index<Variable> for Model {
    type Output = TruthValue;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl IndexMut<Variable> for Model {
    fn index_mut(&mut self, index: Variable) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}

impl Model {
    /// # Panics
    ///
    /// If `num_vars` exceeds [`MAX_VARIABLES`].
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        assert!(
            num_vars <= MAX_VARIABLES,
            "{num_vars} variables exceed the limit of {MAX_VARIABLES}"
        );
        Self(vec![TruthValue::Undefined; num_vars])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Makes `lit` true by assigning its variable.
    pub fn set(&mut self, lit: Literal) {
        self[lit.variable()] = TruthValue::from_bool(lit.is_positive());
    }

    /// The value of `lit`: `True` if it holds, `False` if its negation holds.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> TruthValue {
        match (self[lit.variable()], lit.is_positive()) {
            (TruthValue::Undefined, _) => TruthValue::Undefined,
            (value, true) => value,
            (TruthValue::True, false) => TruthValue::False,
            (TruthValue::False, false) => TruthValue::True,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, TruthValue)> + '_ {
        // `new` bounds the length, so the counter cannot overflow
        (0..)
            .zip(&self.0)
            .map(|(i, &v)| (Variable::new(i), v))
    }

    /// Every assigned variable as the literal that currently holds.
    pub fn assigned_literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.iter()
            .filter_map(|(x, v)| v.as_bool().map(|b| Literal::from_var(x, b)))
    }

    #[must_use]
    pub fn num_assigned(&self) -> usize {
        self.0.iter().filter(|v| v.is_assigned()).count()
    }

    #[must_use]
    pub fn num_open(&self) -> usize {
        self.len() - self.num_assigned()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TruthValue] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::{neg, pos};

    #[test]
    fn test_new_model_is_undefined() {
        let m = Model::new(5);
        assert_eq!(m.len(), 5);
        assert!(m.iter().all(|(_, v)| v == TruthValue::Undefined));
        assert_eq!(m.num_open(), 5);
    }

    #[test]
    fn test_literal_value() {
        let mut m = Model::new(3);
        m.set(neg(Variable::new(1)));

        assert_eq!(m[Variable::new(1)], TruthValue::False);
        assert_eq!(m.literal_value(neg(Variable::new(1))), TruthValue::True);
        assert_eq!(m.literal_value(pos(Variable::new(1))), TruthValue::False);
        assert_eq!(m.literal_value(pos(Variable::new(2))), TruthValue::Undefined);
    }

    #[test]
    fn test_iter_numbers_variables_in_order() {
        let mut m = Model::new(3);
        m.set(pos(Variable::new(2)));

        let vars: Vec<_> = m.iter().map(|(x, _)| x.get()).collect();
        assert_eq!(vars, vec![0, 1, 2]);
        assert_eq!(m.iter().last(), Some((Variable::new(2), TruthValue::True)));
    }

    #[test]
    #[should_panic(expected = "exceed the limit")]
    fn test_new_rejects_too_many_variables() {
        let _ = Model::new(MAX_VARIABLES + 1);
    }

    #[test]
    fn test_assigned_literals() {
        let mut m = Model::new(4);
        m.set(pos(Variable::new(3)));
        m.set(neg(Variable::new(0)));

        let lits: Vec<_> = m.assigned_literals().collect();
        assert_eq!(lits, vec![neg(Variable::new(0)), pos(Variable::new(3))]);
        assert_eq!(m.num_assigned(), 2);
    }
}
