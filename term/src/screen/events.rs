// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Outbound callbacks as a FIFO event queue.
//!
//! The core never calls the embedder directly; it queues [`TermEvent`]s that
//! the embedder drains after each ingest call. A single queue (rather than
//! one per callback) is what guarantees the ordering contract: responses to
//! DSR/DA leave in exactly the order the triggering sequences arrived.

/// Clipboard slot addressed by OSC 52.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipboardSelector {
    Clipboard,
    Primary,
}

/// One outbound effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermEvent {
    /// Bytes for the child's stdin: query responses, encoded keys, paste.
    WriteToChild(Vec<u8>),
    /// OSC 0/2.
    SetTitle(String),
    /// OSC 0/1.
    SetIconName(String),
    /// OSC 52. Data is the base64 payload as received; decoding is the
    /// embedder's concern.
    SetClipboard {
        selector: ClipboardSelector,
        data: Vec<u8>,
    },
    /// BEL.
    Bell,
    /// The child asked for attention (e.g. bell while unfocused policy is the
    /// embedder's).
    RequestAttention,
}
