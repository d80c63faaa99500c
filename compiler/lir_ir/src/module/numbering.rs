//! Slot numbers for anonymous values.
//!
//! Anonymous globals share one counter across the module, in the order
//! variables, functions, aliases, indirect functions. Each function body
//! has its own counter over its anonymous parameters, then its blocks and
//! their value-producing instructions in layout order.

use lir_types::Idx;

use super::Module;

impl Module {
    /// Assign numbers to every anonymous value. Named values keep no number.
    ///
    /// Numbers are not updated automatically; call this again after
    /// structural edits or renames, before printing.
    pub fn number_values(&mut self) {
        let mut next = 0u32;
        let globals = self
            .globals
            .iter_mut()
            .map(|g| &mut g.name)
            .chain(self.funcs.iter_mut().map(|f| &mut f.name))
            .chain(self.aliases.iter_mut().map(|a| &mut a.name))
            .chain(self.ifuncs.iter_mut().map(|i| &mut i.name));
        for slot in globals {
            slot.number = slot.name.is_empty().then(|| bump(&mut next));
        }
        let global_count = next;

        let mut local_count = 0u32;
        for func in &self.funcs {
            let mut next = 0u32;
            for &param in &func.params {
                let slot = &mut self.params[param.index()].name;
                slot.number = slot.name.is_empty().then(|| bump(&mut next));
            }
            for &block in &func.blocks {
                let data = &mut self.blocks[block.index()];
                data.name.number = data.name.name.is_empty().then(|| bump(&mut next));
                for &inst in &data.insts {
                    let inst = &mut self.insts[inst.index()];
                    let numbered = inst.name.name.is_empty() && inst.ty != Idx::VOID;
                    inst.name.number = numbered.then(|| bump(&mut next));
                }
            }
            local_count += next;
        }
        tracing::debug!(global_count, local_count, "numbered anonymous values");
    }
}

fn bump(next: &mut u32) -> u32 {
    let current = *next;
    *next += 1;
    current
}
