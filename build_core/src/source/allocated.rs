//! AllocatedSource - Attribute points the player assigned

use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::AttributeSet;

/// Attributes allocated by the player, floor included
pub struct AllocatedSource<'a> {
    pub attributes: &'a AttributeSet,
}

impl<'a> AllocatedSource<'a> {
    pub fn new(attributes: &'a AttributeSet) -> Self {
        AllocatedSource { attributes }
    }
}

impl StatSource for AllocatedSource<'_> {
    fn id(&self) -> &str {
        "allocated"
    }

    fn priority(&self) -> i32 {
        -100 // Allocated points apply first
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.add_attributes(self.attributes);
    }
}
