use crate::error::InterpreterError;

/// Slot storage for one evaluation, indexed by identifier id.
///
/// Each evaluation builds its own `Environment`, so one compiled function can
/// be evaluated from several threads at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    slots: Vec<i64>,
}

impl Environment {
    /// Start from the function's initial slot values and overwrite the
    /// leading parameter slots with `parameters`.
    pub fn new(initial: &[i64], parameter_count: usize, parameters: &[i64]) -> Result<Self, InterpreterError> {
        if parameters.len() != parameter_count {
            return Err(InterpreterError::ParameterCountMismatch {
                expected: parameter_count,
                found: parameters.len(),
            });
        }
        if parameter_count > initial.len() {
            return Err(InterpreterError::InvalidSlot(initial.len()));
        }
        let mut slots = initial.to_vec();
        slots[..parameter_count].copy_from_slice(parameters);
        Ok(Self { slots })
    }

    pub fn get(&self, id: usize) -> Result<i64, InterpreterError> {
        self.slots.get(id).copied().ok_or(InterpreterError::InvalidSlot(id))
    }

    pub fn set(&mut self, id: usize, value: i64) -> Result<(), InterpreterError> {
        let slot = self.slots.get_mut(id).ok_or(InterpreterError::InvalidSlot(id))?;
        *slot = value;
        Ok(())
    }
}
