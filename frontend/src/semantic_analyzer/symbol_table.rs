use std::collections::HashMap;
use string_interner::DefaultSymbol;
use crate::source::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierClass {
    Parameter,
    Variable,
    Constant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: DefaultSymbol,
    pub location: SourceLocation,
    pub class: IdentifierClass,
    pub id: usize,
    /// Set for constants only.
    pub value: Option<i64>,
}

/// Every declared name of a function, numbered in declaration order.
///
/// Names are unique across all classes. Ids are dense, starting at 0, so
/// they double as slot indices for the evaluator.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    ids: HashMap<DefaultSymbol, usize>,
    identifiers: Vec<Identifier>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` and return its id, or the location of the earlier
    /// declaration if the name is taken.
    pub fn add(
        &mut self,
        name: DefaultSymbol,
        location: SourceLocation,
        class: IdentifierClass,
        value: Option<i64>,
    ) -> Result<usize, SourceLocation> {
        if let Some(&existing) = self.ids.get(&name) {
            return Err(self.identifiers[existing].location);
        }
        let id = self.identifiers.len();
        self.ids.insert(name, id);
        self.identifiers.push(Identifier { name, location, class, id, value });
        Ok(id)
    }

    pub fn get(&self, name: DefaultSymbol) -> Option<&Identifier> {
        self.ids.get(&name).map(|&id| &self.identifiers[id])
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn parameter_count(&self) -> usize {
        self.count(IdentifierClass::Parameter)
    }

    pub fn count(&self, class: IdentifierClass) -> usize {
        self.identifiers.iter().filter(|i| i.class == class).count()
    }

    /// Initial value of every slot, indexed by id: zero for parameters and
    /// variables, the declared value for constants.
    pub fn slots(&self) -> Vec<i64> {
        self.identifiers.iter().map(|i| i.value.unwrap_or(0)).collect()
    }

    /// Identifiers in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Identifier> {
        self.identifiers.iter()
    }
}
