//! C3 linearization

use std::sync::Arc;

use super::ClassDef;
use crate::meta::ContractError;

/// Method resolution order for a class with the given bases, excluding the
/// class itself.
pub(crate) fn linearize(
    class_name: &str,
    bases: &[Arc<ClassDef>],
) -> Result<Vec<Arc<ClassDef>>, ContractError> {
    let mut sequences: Vec<Vec<Arc<ClassDef>>> = bases
        .iter()
        .map(|base| {
            let mut sequence = Vec::with_capacity(base.mro().len() + 1);
            sequence.push(Arc::clone(base));
            sequence.extend(base.mro().iter().cloned());
            sequence
        })
        .collect();
    sequences.push(bases.to_vec());

    let mut order = Vec::new();
    loop {
        sequences.retain(|sequence| !sequence.is_empty());
        if sequences.is_empty() {
            return Ok(order);
        }

        // A head is usable when it appears in no sequence tail
        let next = sequences
            .iter()
            .map(|sequence| &sequence[0])
            .find(|head| {
                !sequences
                    .iter()
                    .any(|sequence| sequence[1..].iter().any(|c| Arc::ptr_eq(c, *head)))
            })
            .cloned();

        let Some(next) = next else {
            return Err(ContractError::InconsistentHierarchy {
                class_name: class_name.to_string(),
                bases: bases.iter().map(|b| b.name().to_string()).collect(),
            });
        };

        for sequence in sequences.iter_mut() {
            if Arc::ptr_eq(&sequence[0], &next) {
                sequence.remove(0);
            }
        }
        order.push(next);
    }
}
