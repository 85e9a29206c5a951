//! Expression reduction.

use std::collections::HashMap;

use crate::expr::core::Expression;
use crate::expr::term::Term;

/// Merge terms that name the same variable.
///
/// The result holds one term per distinct variable, with the summed
/// coefficient, in order of each variable's first appearance. Terms whose
/// coefficients cancel to zero are kept. The constant is passed through
/// unchanged and the input is left untouched.
pub fn reduce(raw: &Expression) -> Expression {
    let mut slots: HashMap<usize, usize> = HashMap::with_capacity(raw.terms().len());
    let mut terms: Vec<Term> = Vec::with_capacity(raw.terms().len());

    for term in raw.terms() {
        match slots.get(&term.variable().key()) {
            Some(&slot) => {
                let merged = terms[slot].coefficient() + term.coefficient();
                terms[slot] = Term::new(term.variable().clone(), merged);
            }
            None => {
                slots.insert(term.variable().key(), terms.len());
                terms.push(term.clone());
            }
        }
    }

    tracing::trace!(
        component = "expr",
        operation = "reduce",
        input_terms = raw.terms().len(),
        output_terms = terms.len(),
        "Reduced expression"
    );

    Expression::new(terms, raw.constant())
}
