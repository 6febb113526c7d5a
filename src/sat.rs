//! SAT engine seam.
//!
//! The exact solver only needs fresh variables, clauses, a satisfiability
//! check and model lookups, so that is all [`SatEngine`] exposes. The
//! production engine wraps CaDiCaL.

use cadical_sys::{CaDiCal, Status, Terminator};

use crate::cancel::CancelToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Var(i32);

/// A variable or its negation, DIMACS style: negative means negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lit(i32);

impl Var {
    pub fn positive(self) -> Lit {
        Lit(self.0)
    }

    pub fn negative(self) -> Lit {
        Lit(-self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatOutcome {
    Satisfiable,
    Unsatisfiable,
    /// The engine gave up before deciding, e.g. because it was cancelled.
    Interrupted,
}

pub trait SatEngine {
    fn new_var(&mut self) -> Var;
    fn add_clause(&mut self, clause: &[Lit]);
    fn solve(&mut self) -> SatOutcome;
    /// Truth value of `lit` in the model. Only valid right after `solve`
    /// returned [`SatOutcome::Satisfiable`].
    fn model_value(&mut self, lit: Lit) -> bool;
}

/// Stops a running CaDiCaL search once the token is cancelled.
struct Interrupt(CancelToken);

impl Terminator for Interrupt {
    fn terminated(&mut self) -> bool {
        self.0.is_cancelled()
    }
}

pub struct Cadical {
    solver: CaDiCal,
}

impl Cadical {
    pub fn new() -> Self {
        Cadical {
            solver: CaDiCal::new(),
        }
    }

    /// An engine whose `solve` returns [`SatOutcome::Interrupted`] soon after
    /// `cancel` fires.
    pub fn interruptible(cancel: &CancelToken) -> Self {
        let mut engine = Self::new();
        engine.solver.connect_terminator(Interrupt(cancel.clone()));
        engine
    }
}

impl Default for Cadical {
    fn default() -> Self {
        Self::new()
    }
}

impl SatEngine for Cadical {
    fn new_var(&mut self) -> Var {
        Var(self.solver.declare_one_more_variable())
    }

    fn add_clause(&mut self, clause: &[Lit]) {
        for lit in clause {
            self.solver.add(lit.0);
        }
        self.solver.add(0);
    }

    fn solve(&mut self) -> SatOutcome {
        match self.solver.solve() {
            Status::SATISFIABLE => SatOutcome::Satisfiable,
            Status::UNSATISFIABLE => SatOutcome::Unsatisfiable,
            Status::UNKNOWN => SatOutcome::Interrupted,
        }
    }

    fn model_value(&mut self, lit: Lit) -> bool {
        self.solver.val(lit.0) > 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn vars(engine: &mut impl SatEngine, n: usize) -> Vec<Var> {
        (0..n).map(|_| engine.new_var()).collect()
    }

    #[test]
    fn test_literals() {
        let mut engine = Cadical::new();
        let x = engine.new_var();
        let y = engine.new_var();
        assert_ne!(x.positive(), x.negative());
        assert_ne!(x.positive(), y.positive());
    }

    #[test]
    fn test_satisfiable_model() {
        let mut engine = Cadical::new();
        let v = vars(&mut engine, 3);
        // (a | b) & (!a | c) & (!b | !c) & a
        engine.add_clause(&[v[0].positive(), v[1].positive()]);
        engine.add_clause(&[v[0].negative(), v[2].positive()]);
        engine.add_clause(&[v[1].negative(), v[2].negative()]);
        engine.add_clause(&[v[0].positive()]);
        assert_eq!(engine.solve(), SatOutcome::Satisfiable);
        assert!(engine.model_value(v[0].positive()));
        assert!(engine.model_value(v[2].positive()));
        assert!(!engine.model_value(v[1].positive()));
        assert!(engine.model_value(v[1].negative()));
    }

    #[test]
    fn test_unsatisfiable() {
        let mut engine = Cadical::new();
        let x = engine.new_var();
        engine.add_clause(&[x.positive()]);
        engine.add_clause(&[x.negative()]);
        assert_eq!(engine.solve(), SatOutcome::Unsatisfiable);
    }

    #[test]
    fn test_empty_formula_is_satisfiable() {
        let mut engine = Cadical::new();
        assert_eq!(engine.solve(), SatOutcome::Satisfiable);
    }

    #[test]
    fn test_cancelled_engine_is_interrupted() {
        // pigeonhole: 11 pigeons, 10 holes, far too hard to refute before
        // the first termination check
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut engine = Cadical::interruptible(&cancel);
        let (pigeons, holes) = (11, 10);
        let v = vars(&mut engine, pigeons * holes);
        let at = |p: usize, h: usize| v[p * holes + h];
        for p in 0..pigeons {
            let clause: Vec<Lit> = (0..holes).map(|h| at(p, h).positive()).collect();
            engine.add_clause(&clause);
        }
        for h in 0..holes {
            for p in 0..pigeons {
                for q in p + 1..pigeons {
                    engine.add_clause(&[at(p, h).negative(), at(q, h).negative()]);
                }
            }
        }
        assert_eq!(engine.solve(), SatOutcome::Interrupted);
    }
}
