//! One Q.921 data link: receive queue, dispatcher, frame builders, timers.
//!
//! # Data flow
//!
//! ```text
//!   D-channel ──queue_frame──> FrameQueue ──rx12──> dispatcher ──deliver──> Layer3
//!                                                      │
//!   D-channel <──transmit── Layer1 <── send_* builders ┘ (RR, UA, keepalive)
//! ```
//!
//! Frames are queued by whatever reads the D-channel and processed one at a
//! time by [`Trunk::rx12`]. Replies are built immediately and handed to
//! [`Layer1`] before `rx12` returns.
//!
//! # Scope of the link procedures
//!
//! There is no DOWN/ESTABLISHING/UP state machine. SABME resets the counters
//! and is answered with UA, but I-frames are accepted whether or not a SABME
//! was ever seen. T200 expiry is logged and otherwise ignored; nothing is
//! retransmitted. T203 expiry sends an RR command with P=1 and re-arms.
//! T203 only runs while nothing is outstanding: sending an I-frame stops it
//! and the acknowledgement that brings V(A) up to V(S) starts it again.
//!
//! All methods take `&mut self` and run to completion. A trunk shared between
//! threads must be wrapped by the caller.

use std::fmt;

use q921_proto::{Control, Frame, Header, SupervisoryKind, UnnumberedKind};

use crate::{
    config::{MAX_HEADER_SPACE, TrunkConfig},
    env::Clock,
    error::{ConfigError, QueueError, TrunkError},
    layer::{Layer1, Layer3},
    link::{CommandResponse, LinkState},
    queue::FrameQueue,
    timer::TimerSet,
};

/// Result of a frame builder.
pub type SendResult<L1> = Result<usize, TrunkError<<L1 as Layer1>::Error>>;

/// A single LAPD data link.
pub struct Trunk<L1, L3> {
    queue: FrameQueue,
    link: DataLink<L1, L3>,
}

/// Everything except the receive queue, so a peeked frame can be processed
/// while the queue is still borrowed.
struct DataLink<L1, L3> {
    config: TrunkConfig,
    state: LinkState,
    timers: TimerSet,
    layer1: L1,
    layer3: L3,
    clock: Option<Box<dyn Clock>>,
    last_now: u64,
}

impl<L1: Layer1, L3: Layer3> Trunk<L1, L3> {
    /// Build a trunk with counters at zero and both timers stopped.
    ///
    /// No clock is registered: [`timer_tick`](Self::timer_tick) does nothing
    /// until one is set with [`with_clock`](Self::with_clock).
    pub fn new(config: TrunkConfig, layer1: L1, layer3: L3) -> Result<Self, ConfigError> {
        config.validate()?;

        let queue = FrameQueue::new(vec![0u8; config.queue_bytes], config.queue_slots)?;
        let state = LinkState::new(config.sapi, config.tei, config.role);
        let timers = TimerSet::new(config.t200_ms, config.t203_ms);

        Ok(Self {
            queue,
            link: DataLink { config, state, timers, layer1, layer3, clock: None, last_now: 0 },
        })
    }

    /// Register the clock used by [`timer_tick`](Self::timer_tick) and for
    /// arming timers.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.set_clock(clock);
        self
    }

    /// Replace the registered clock.
    pub fn set_clock(&mut self, clock: impl Clock + 'static) {
        self.link.clock = Some(Box::new(clock));
    }

    /// Trunk configuration.
    pub fn config(&self) -> &TrunkConfig {
        &self.link.config
    }

    /// Addressing and sequence counters.
    pub fn link(&self) -> &LinkState {
        &self.link.state
    }

    /// T200/T203 deadlines.
    pub fn timers(&self) -> &TimerSet {
        &self.link.timers
    }

    /// Receive queue.
    pub fn queue(&self) -> &FrameQueue {
        &self.queue
    }

    /// Layer 1 endpoint.
    pub fn layer1(&self) -> &L1 {
        &self.link.layer1
    }

    /// Layer 1 endpoint, mutably.
    pub fn layer1_mut(&mut self) -> &mut L1 {
        &mut self.link.layer1
    }

    /// Layer 3 endpoint.
    pub fn layer3(&self) -> &L3 {
        &self.link.layer3
    }

    /// Layer 3 endpoint, mutably.
    pub fn layer3_mut(&mut self) -> &mut L3 {
        &mut self.link.layer3
    }

    /// Bring the link up from this side: arm T203 and send SABME with P=1.
    pub fn start(&mut self) -> SendResult<L1> {
        let now = self.link.now();
        self.link.timers.restart_t203(now);
        self.link.send_sabme(true)
    }

    /// Stop both timers and discard queued frames.
    pub fn stop(&mut self) {
        self.link.timers.stop_all();
        self.queue.clear();
    }

    /// Copy a raw frame (header reservation included) into the receive
    /// queue. On error the frame is lost.
    pub fn queue_frame(&mut self, raw: &[u8]) -> Result<(), QueueError> {
        self.queue.write(raw).inspect_err(|err| {
            tracing::warn!(
                sapi = self.link.state.sapi(),
                tei = self.link.state.tei(),
                len = raw.len(),
                "dropping received frame: {err}"
            );
        })
    }

    /// Process the oldest queued frame.
    ///
    /// Returns `false` if the queue was empty. A frame that cannot be
    /// classified is dropped and still counts as processed.
    pub fn rx12(&mut self) -> bool {
        let Some(raw) = self.queue.peek() else {
            return false;
        };
        self.link.receive(raw);
        self.queue.pop();
        true
    }

    /// Process queued frames until the queue is empty. Returns how many were
    /// processed.
    pub fn drain(&mut self) -> usize {
        let mut processed = 0;
        while self.rx12() {
            processed += 1;
        }
        processed
    }

    /// Run expired timers against the registered clock.
    ///
    /// Without a clock no timer ever fires.
    pub fn timer_tick(&mut self) {
        let Some(now) = self.link.clock.as_ref().map(|clock| clock.now_ms()) else {
            return;
        };
        self.timer_tick_at(now);
    }

    /// Run expired timers as of `now` milliseconds.
    pub fn timer_tick_at(&mut self, now: u64) {
        self.link.last_now = now;
        let expired = self.link.timers.poll(now);
        if !expired.any() {
            return;
        }

        if expired.t200 {
            self.link.timers.stop_t200();
            tracing::warn!(
                sapi = self.link.state.sapi(),
                tei = self.link.state.tei(),
                outstanding = self.link.state.outstanding(),
                "T200 expired, retransmission not supported"
            );
        }

        if expired.t203 {
            self.link.timers.restart_t203(now);
            tracing::debug!(sapi = self.link.state.sapi(), tei = self.link.state.tei(), "T203 expired, polling peer");
            if let Err(err) = self.link.send_rr(CommandResponse::Command, true) {
                tracing::warn!("keepalive RR failed: {err}");
            }
        }
    }

    /// Send an I-frame with N(S)=V(S), N(R)=V(R) as a command, then advance
    /// V(S), start T200 and stop T203.
    ///
    /// V(S) advances even if layer 1 rejects the frame. Payloads longer than
    /// N201 are refused before anything changes.
    pub fn send_i(&mut self, payload: &[u8], poll: bool) -> SendResult<L1> {
        self.link.send_i(payload, poll)
    }

    /// Send RR with N(R)=V(R).
    pub fn send_rr(&mut self, direction: CommandResponse, poll_final: bool) -> SendResult<L1> {
        self.link.send_rr(direction, poll_final)
    }

    /// Send RNR with N(R)=V(R).
    pub fn send_rnr(&mut self, direction: CommandResponse, poll_final: bool) -> SendResult<L1> {
        self.link.send_supervisory(SupervisoryKind::Rnr, direction, poll_final)
    }

    /// Send REJ with N(R)=V(R).
    pub fn send_rej(&mut self, direction: CommandResponse, poll_final: bool) -> SendResult<L1> {
        self.link.send_supervisory(SupervisoryKind::Rej, direction, poll_final)
    }

    /// Send SABME as a command.
    pub fn send_sabme(&mut self, poll: bool) -> SendResult<L1> {
        self.link.send_sabme(poll)
    }

    /// Send DISC as a command.
    pub fn send_disc(&mut self, poll: bool) -> SendResult<L1> {
        self.link.send_unnumbered(UnnumberedKind::Disc, CommandResponse::Command, poll)
    }

    /// Send DM as a response.
    pub fn send_dm(&mut self, fin: bool) -> SendResult<L1> {
        self.link.send_unnumbered(UnnumberedKind::Dm, CommandResponse::Response, fin)
    }

    /// Send UA as a response.
    pub fn send_ua(&mut self, fin: bool) -> SendResult<L1> {
        self.link.send_unnumbered(UnnumberedKind::Ua, CommandResponse::Response, fin)
    }
}

impl<L1, L3> fmt::Debug for Trunk<L1, L3> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trunk")
            .field("config", &self.link.config)
            .field("link", &self.link.state)
            .field("timers", &self.link.timers)
            .field("queued", &self.queue.len())
            .field("clock", &self.link.clock.is_some())
            .finish_non_exhaustive()
    }
}

impl<L1: Layer1, L3: Layer3> DataLink<L1, L3> {
    fn now(&self) -> u64 {
        self.clock.as_ref().map_or(self.last_now, |clock| clock.now_ms())
    }

    fn receive(&mut self, raw: &[u8]) {
        let Some(bytes) = raw.get(self.config.header_space..) else {
            tracing::debug!(len = raw.len(), "dropping frame shorter than header reservation");
            return;
        };

        let frame = match Frame::parse(bytes) {
            Ok(frame) => frame,
            Err(err) => {
                tracing::debug!(len = bytes.len(), "dropping unclassifiable frame: {err}");
                return;
            },
        };
        self.trace("rx", &frame);

        match frame.header.control {
            Control::Information { nr, poll, .. } => {
                self.acknowledge(nr);
                self.state.receive_i_frame();

                if let Err(err) = self.layer3.deliver(frame.info) {
                    tracing::warn!("layer 3 rejected information field: {err}");
                }
                if let Err(err) = self.send_rr(CommandResponse::Response, poll) {
                    tracing::warn!("RR acknowledgement failed: {err}");
                }
            },
            Control::Supervisory { kind, nr, poll_final } => {
                self.acknowledge(nr);

                let command = self.state.role().is_peer_command(frame.header.address.cr);
                if kind == SupervisoryKind::Rr && command {
                    if let Err(err) = self.send_rr(CommandResponse::Response, poll_final) {
                        tracing::warn!("RR response failed: {err}");
                    }
                }
            },
            Control::Unnumbered { kind: UnnumberedKind::Sabme, poll_final } => {
                self.state.reset();
                self.timers.stop_t200();
                let now = self.now();
                self.timers.restart_t203(now);

                if let Err(err) = self.send_unnumbered(
                    UnnumberedKind::Ua,
                    CommandResponse::Response,
                    poll_final,
                ) {
                    tracing::warn!("UA response failed: {err}");
                }
            },
            Control::Unnumbered { .. } => {
                tracing::debug!("ignoring {} frame", frame.kind());
            },
        }
    }

    /// Apply N(R). Once nothing is outstanding T200 gives way to T203.
    fn acknowledge(&mut self, nr: q921_proto::Seq) {
        if !self.state.receive_ack(nr) {
            tracing::debug!(
                nr = nr.value(),
                va = self.state.va().value(),
                vs = self.state.vs().value(),
                "N(R) outside acknowledgement window"
            );
            return;
        }
        if self.state.outstanding() == 0 {
            self.timers.stop_t200();
            let now = self.now();
            self.timers.start_t203(now);
        }
    }

    fn send_i(&mut self, payload: &[u8], poll: bool) -> SendResult<L1> {
        if payload.len() > self.config.n201 {
            return Err(TrunkError::PayloadTooLong { len: payload.len(), max: self.config.n201 });
        }

        let header = Header::information(
            self.state.address(CommandResponse::Command),
            self.state.vs(),
            self.state.vr(),
            poll,
        );
        let reserved = self.config.header_space;
        let body = reserved + header.wire_len();

        // FCS placeholder stays zeroed
        let mut frame = vec![0u8; body + payload.len() + Frame::FCS_LEN];
        header.encode_into(&mut frame[reserved..])?;
        frame[body..body + payload.len()].copy_from_slice(payload);

        let sent = self.transmit(&frame);
        self.state.advance_send();
        let now = self.now();
        self.timers.start_t200(now);
        self.timers.stop_t203();
        sent
    }

    fn send_rr(&mut self, direction: CommandResponse, poll_final: bool) -> SendResult<L1> {
        self.send_supervisory(SupervisoryKind::Rr, direction, poll_final)
    }

    fn send_sabme(&mut self, poll: bool) -> SendResult<L1> {
        self.send_unnumbered(UnnumberedKind::Sabme, CommandResponse::Command, poll)
    }

    fn send_supervisory(
        &mut self,
        kind: SupervisoryKind,
        direction: CommandResponse,
        poll_final: bool,
    ) -> SendResult<L1> {
        let header =
            Header::supervisory(self.state.address(direction), kind, self.state.vr(), poll_final);
        self.send_header(header)
    }

    fn send_unnumbered(
        &mut self,
        kind: UnnumberedKind,
        direction: CommandResponse,
        poll_final: bool,
    ) -> SendResult<L1> {
        let header = Header::unnumbered(self.state.address(direction), kind, poll_final);
        self.send_header(header)
    }

    /// Header-only frames fit on the stack.
    fn send_header(&mut self, header: Header) -> SendResult<L1> {
        let mut buf = [0u8; MAX_HEADER_SPACE + Header::MAX_SIZE];
        let reserved = self.config.header_space;
        let len = header.encode_into(&mut buf[reserved..])?;
        self.transmit(&buf[..reserved + len])
    }

    fn transmit(&mut self, frame: &[u8]) -> SendResult<L1> {
        if let Some(Ok(parsed)) = frame.get(self.config.header_space..).map(Frame::parse) {
            self.trace("tx", &parsed);
        }
        self.layer1.transmit(frame).map_err(TrunkError::Transmit)
    }

    fn trace(&self, direction: &'static str, frame: &Frame<'_>) {
        tracing::debug!(
            direction,
            sapi = self.state.sapi(),
            tei = self.state.tei(),
            vs = self.state.vs().value(),
            vr = self.state.vr().value(),
            va = self.state.va().value(),
            info = %hex::encode(frame.info),
            "{frame}"
        );
    }
}
