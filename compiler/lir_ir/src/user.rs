//! The User contract: operand slots and their mutation.
//!
//! An [`OperandSlot`] names one operand position of one instruction. Reading
//! through it always sees the current value; writing goes through
//! [`Module::set_operand`], the single assignment primitive, which keeps the
//! slot's type fixed. Replace-all-uses validates every affected slot before
//! it writes any of them, so it either retargets all uses or none.

use crate::error::{IrError, Result};
use crate::ids::InstId;
use crate::module::Module;
use crate::value::Value;

/// One operand position of a User.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperandSlot {
    pub user: InstId,
    pub index: u32,
}

impl OperandSlot {
    pub fn new(user: InstId, index: u32) -> Self {
        Self { user, index }
    }
}

impl Module {
    /// Current operands of a User, in slot order.
    pub fn operands(&self, user: InstId) -> &[Value] {
        &self.insts[user.index()].operands
    }

    /// Slot handles for every operand of a User.
    pub fn operand_slots(&self, user: InstId) -> impl Iterator<Item = OperandSlot> {
        let len = self.insts[user.index()].operands.len();
        (0..len).map(move |index| OperandSlot::new(user, slot_index(index)))
    }

    /// Value currently held by a slot.
    pub fn operand(&self, slot: OperandSlot) -> Result<Value> {
        let operands = &self.insts[slot.user.index()].operands;
        operands
            .get(slot.index as usize)
            .copied()
            .ok_or(IrError::OperandOutOfRange {
                index: slot.index as usize,
                len: operands.len(),
            })
    }

    /// Store `new` into a slot, returning the value it replaced.
    ///
    /// The new value must have exactly the type of the old one, and slots
    /// that only accept constants reject anything else. On error the slot
    /// is unchanged.
    pub fn set_operand(&mut self, slot: OperandSlot, new: Value) -> Result<Value> {
        let old = self.check_operand(slot, new)?;
        self.insts[slot.user.index()].operands[slot.index as usize] = new;
        tracing::debug!(
            user = ?slot.user,
            index = slot.index,
            old = %self.ident(old),
            new = %self.ident(new),
            "set operand"
        );
        Ok(old)
    }

    /// Slots currently holding `value`, in instruction order.
    pub fn uses_of(&self, value: Value) -> Vec<OperandSlot> {
        self.insts
            .iter()
            .enumerate()
            .flat_map(|(i, inst)| {
                let user = InstId::from_index(i);
                inst.operands
                    .iter()
                    .enumerate()
                    .filter(move |&(_, &operand)| operand == value)
                    .map(move |(index, _)| OperandSlot::new(user, slot_index(index)))
            })
            .collect()
    }

    /// Retarget every use of `old` to `new`. Returns the number of slots
    /// rewritten.
    ///
    /// Every slot is checked first; if any rejects `new`, nothing changes.
    pub fn replace_all_uses(&mut self, old: Value, new: Value) -> Result<usize> {
        let slots = self.uses_of(old);
        for &slot in &slots {
            self.check_operand(slot, new)?;
        }
        for &slot in &slots {
            self.insts[slot.user.index()].operands[slot.index as usize] = new;
        }
        tracing::debug!(
            old = %self.ident(old),
            new = %self.ident(new),
            uses = slots.len(),
            "replaced all uses"
        );
        Ok(slots.len())
    }

    /// Validate a write of `new` into `slot`, returning the current value.
    fn check_operand(&self, slot: OperandSlot, new: Value) -> Result<Value> {
        let old = self.operand(slot)?;
        self.expect_type(self.type_of(old), self.type_of(new))?;
        let kind = self.insts[slot.user.index()].kind;
        if kind.requires_constant(slot.index as usize) && !new.is_constant() {
            return Err(IrError::NonConstantOperand {
                context: kind.name(),
                index: slot.index as usize,
                operand: self.value_str(new),
            });
        }
        Ok(old)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "operand lists never exceed u32"
)]
fn slot_index(index: usize) -> u32 {
    index as u32
}
