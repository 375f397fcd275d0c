//! Frame scheduling.
//!
//! A session asks its scheduler for "the next display frame" after every
//! frame it runs. The host fires the pending ticket once per display frame.
//! At most one ticket is ever pending, so a session can never end up with
//! two frame loops after a pause/resume or a reset.

/// Identifies one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket(pub u64);

pub trait Scheduler {
    /// Request the next frame. Returns the already pending ticket if there is one.
    fn schedule_next(&mut self) -> FrameTicket;

    /// Drop the pending ticket, if any, and return it.
    fn cancel(&mut self) -> Option<FrameTicket>;

    fn pending(&self) -> Option<FrameTicket>;

    /// Host side: consume the pending ticket for this display frame.
    fn fire(&mut self) -> Option<FrameTicket>;

    fn is_pending(&self) -> bool {
        self.pending().is_some()
    }
}

/// Single-slot scheduler driven by the terminal loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSlot {
    pending: Option<FrameTicket>,
    issued: u64,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct tickets handed out so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl Scheduler for FrameSlot {
    fn schedule_next(&mut self) -> FrameTicket {
        if let Some(ticket) = self.pending {
            return ticket;
        }
        self.issued += 1;
        let ticket = FrameTicket(self.issued);
        self.pending = Some(ticket);
        ticket
    }

    fn cancel(&mut self) -> Option<FrameTicket> {
        self.pending.take()
    }

    fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }

    fn fire(&mut self) -> Option<FrameTicket> {
        self.pending.take()
    }
}
