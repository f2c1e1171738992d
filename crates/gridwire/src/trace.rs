//! Grid operation tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect
//! operation semantics.

///
/// GridTraceSink
///

pub trait GridTraceSink {
    fn on_event(&self, event: GridTraceEvent);
}

///
/// GridTraceEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GridTraceEvent {
    ReadStart {
        entity: String,
    },
    FilterCompiled {
        bindings: usize,
    },
    ReadFinish {
        records: u64,
        rows: usize,
    },
    WriteApplied {
        kind: WriteKind,
        entity: String,
    },
    DeleteApplied {
        entity: String,
        removed: usize,
    },
}

///
/// WriteKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteKind {
    Create,
    Update,
}
