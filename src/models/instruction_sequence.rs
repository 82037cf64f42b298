use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use std::collections::BTreeSet;

/// An ordered, immutable list of instructions.
///
/// Sequences are combined by value; the order of the inputs is the order of
/// the result and nothing is deduplicated or dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionSequence(Vec<Instruction>);

impl InstructionSequence {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self(instructions)
    }

    pub fn single(instruction: Instruction) -> Self {
        Self(vec![instruction])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.0
    }

    /// Returns `self` followed by `next`.
    pub fn concat(self, next: InstructionSequence) -> Self {
        let mut instructions = self.0;
        instructions.extend(next.0);
        Self(instructions)
    }

    /// Returns `first` followed by `self`.
    pub fn prepend(self, first: Instruction) -> Self {
        Self::single(first).concat(self)
    }

    /// Addresses flagged as signers by any instruction.
    pub fn signers(&self) -> BTreeSet<Pubkey> {
        self.0
            .iter()
            .flat_map(|ix| ix.accounts.iter())
            .filter(|meta| meta.is_signer)
            .map(|meta| meta.pubkey)
            .collect()
    }

    pub fn into_inner(self) -> Vec<Instruction> {
        self.0
    }
}

impl From<Vec<Instruction>> for InstructionSequence {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self(instructions)
    }
}

impl FromIterator<InstructionSequence> for InstructionSequence {
    fn from_iter<I: IntoIterator<Item = InstructionSequence>>(iter: I) -> Self {
        iter.into_iter()
            .fold(InstructionSequence::default(), InstructionSequence::concat)
    }
}

impl IntoIterator for InstructionSequence {
    type Item = Instruction;
    type IntoIter = std::vec::IntoIter<Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
