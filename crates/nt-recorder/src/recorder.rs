//! The `Recorder` — ties tagging, correlation, topology, and output
//! together behind the engine's callbacks.

use nt_core::{LinkLayerAddr, NodeId, PacketHandle, PacketUid, SimRng, SimTime, Vec3};
use nt_correlate::{Expected, IdentityTagger, LinkTech, PendingSet, PendingTx, TxAux};
use nt_output::{OutputError, OutputSession, TraceEvent, TxRef};
use nt_topology::{NodeLabels, PositionTracker, TopoBounds};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::config::RecorderConfig;
use crate::error::{RecorderError, RecorderResult};
use crate::probe::SimulationProbe;

/// Fraction of the larger bounds extent added as margin on every side of
/// the output coordinate space.
const BOUNDS_MARGIN: f64 = 0.05;

// ── Transmit descriptors ──────────────────────────────────────────────────────

/// Whether a frame carries payload or link-layer chatter.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FrameKind {
    Data,
    /// Beacons, association requests, acks, … — dropped unless the
    /// configuration asks for them.
    Control,
}

/// What the transmit notification knows about a transmission.
#[derive(Clone, Debug)]
pub struct TxDescriptor {
    /// Signal range in coordinate units; meaningful for radio technologies
    /// only.
    pub range: f64,
    /// The receivers this transmission is expected to reach.
    pub expected: Expected,
    pub frame: FrameKind,
}

impl TxDescriptor {
    /// A radio transmission.
    pub fn wireless(range: f64, expected: Expected) -> TxDescriptor {
        TxDescriptor {
            range,
            expected,
            frame: FrameKind::Data,
        }
    }

    /// A shared-medium wire transmission.
    pub fn wired(expected: Expected) -> TxDescriptor {
        TxDescriptor {
            range: 0.0,
            expected,
            frame: FrameKind::Data,
        }
    }

    /// Mark this frame as link-layer control traffic.
    pub fn control(mut self) -> TxDescriptor {
        self.frame = FrameKind::Control;
        self
    }
}

// ── Recorder ──────────────────────────────────────────────────────────────────

/// Records one simulation run.
///
/// All state — the identity counter, the pending tables, the topology
/// bounds — is owned by the instance and starts empty, so every run (and
/// every test) is independent.  Every entry point follows the same shape:
/// mutate the tables first, then emit; serialization is gated by the
/// configured time window and by the session's health, the mutation never
/// is.
pub struct Recorder {
    config: RecorderConfig,
    tagger: IdentityTagger,
    pending: PendingSet,
    tracker: PositionTracker,
    labels: NodeLabels,
    links: Vec<(NodeId, NodeId)>,
    /// MAC → owning node, fed by `register_device`.
    addr_map: FxHashMap<[u8; 6], NodeId>,
    rng: SimRng,
    session: Option<OutputSession>,
    started: bool,
    open_failed: bool,
    wireless_rx_recorded: bool,
}

impl Recorder {
    /// Validate `config` and build an idle recorder.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::Config`] for a malformed configuration
    /// (inverted time window, zero rotation ceiling, zero poll interval).
    pub fn new(config: RecorderConfig) -> RecorderResult<Recorder> {
        config.validate()?;
        let rng = SimRng::new(config.seed);
        let tracker = PositionTracker::new(config.synthesize_positions);
        Ok(Recorder {
            config,
            tagger: IdentityTagger::new(),
            pending: PendingSet::new(),
            tracker,
            labels: NodeLabels::new(),
            links: Vec::new(),
            addr_map: FxHashMap::default(),
            rng,
            session: None,
            started: false,
            open_failed: false,
            wireless_rx_recorded: false,
        })
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Attach a free-text description to `node`.  Read when the node is
    /// serialized; may be set before or during the run.
    pub fn set_node_label(&mut self, node: NodeId, label: impl Into<String>) {
        self.labels.set(node, label);
    }

    /// Declare a point-to-point link.  Links declared before `start` appear
    /// in the topology block; later ones are emitted immediately.
    pub fn declare_link(&mut self, from: NodeId, to: NodeId) {
        self.links.push((from, to));
        if self.started {
            self.emit(&TraceEvent::Link { from, to });
        }
    }

    /// Register a device's link-layer address so address-keyed receive
    /// notifications can resolve their owning node.
    ///
    /// # Errors
    ///
    /// Grid addresses cannot key the map — their MAC form is not yet
    /// supported and the conversion fails explicitly.
    pub fn register_device(&mut self, node: NodeId, addr: LinkLayerAddr) -> RecorderResult<()> {
        let mac = addr.as_mac48()?;
        self.addr_map.insert(mac, node);
        Ok(())
    }

    /// Install a callback observing every string written to the sink.
    /// Replaces any previous tap.  No-op before `start`.
    pub fn set_write_tap(&mut self, tap: Box<dyn FnMut(&str)>) {
        if let Some(session) = self.session.as_mut() {
            session.set_tap(tap);
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Open the output and write the topology block.
    ///
    /// For a socket target this blocks until a peer connects — the only
    /// blocking point in the system, before any simulation event.
    ///
    /// # Errors
    ///
    /// An open/bind failure is returned *and* leaves the recorder in a
    /// permanent no-op state: the simulation carries on, nothing is
    /// recorded, and [`is_failed`](Self::is_failed) reports it.
    pub fn start<P: SimulationProbe>(&mut self, probe: &P) -> RecorderResult<()> {
        if self.started || self.open_failed {
            return Ok(());
        }
        let session = match OutputSession::open(self.config.target.clone(), self.config.format) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "could not open trace output; recording disabled");
                self.open_failed = true;
                return Err(e.into());
            }
        };
        self.session = Some(session);
        self.started = true;

        // Place every node before declaring the topology so the bounds
        // cover the initial layout.
        let nodes = probe.node_ids();
        let mut placed: Vec<(NodeId, Vec3)> = Vec::with_capacity(nodes.len());
        for &node in &nodes {
            if let Some(pos) = self.tracker.current(node, probe, &mut self.rng) {
                self.tracker.update(node, pos);
                placed.push((node, pos));
            }
        }

        let bounds = self.bounds();
        self.emit(&TraceEvent::TopologyStart { bounds });
        for (node, pos) in placed {
            let label = self.labels.get(node).map(str::to_owned);
            self.emit(&TraceEvent::Node {
                id: node,
                pos,
                label,
            });
        }
        let links = self.links.clone();
        for (from, to) in links {
            self.emit(&TraceEvent::Link { from, to });
        }
        self.emit(&TraceEvent::TopologyEnd);
        Ok(())
    }

    /// Close the output.  Idempotent; callbacks arriving afterwards still
    /// mutate the tables but write nothing.
    pub fn stop(&mut self) -> RecorderResult<()> {
        if !self.started {
            return Ok(());
        }
        self.started = false;
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if !self.wireless_rx_recorded {
            // Never leave a structurally empty stream behind.
            session.write_event(&TraceEvent::Placeholder);
        }
        session.close()?;
        Ok(())
    }

    // ── Notification entry points ─────────────────────────────────────────

    /// A device on `sender` began transmitting `packet` over `tech`.
    ///
    /// Tags the packet (idempotently), tables the transmit metadata, then
    /// emits the transmit event if the time window allows.
    pub fn transmit<P: SimulationProbe>(
        &mut self,
        probe: &P,
        tech: LinkTech,
        packet: PacketHandle,
        sender: NodeId,
        desc: TxDescriptor,
    ) {
        if desc.frame == FrameKind::Control && !self.config.show_control_frames {
            return;
        }
        let now = probe.now();
        let uid = self.tagger.tag(packet);

        let aux = if tech.is_wireless() {
            TxAux::Wireless { range: desc.range }
        } else {
            TxAux::Wired
        };
        self.pending.record_tx(
            tech,
            uid,
            PendingTx {
                sender,
                tx_time: now,
                aux,
                expected: desc.expected,
            },
        );

        if !self.should_serialize(now) {
            return;
        }
        let meta = if self.config.capture_metadata {
            probe.packet_summary(packet)
        } else {
            None
        };
        let event = if tech.is_wireless() {
            TraceEvent::WirelessTx {
                uid,
                from: sender,
                time: now,
                range: desc.range,
                meta,
            }
        } else {
            TraceEvent::WiredTx {
                uid,
                from: sender,
                time: now,
                meta,
            }
        };
        self.emit(&event);
    }

    /// A device on `receiver` finished receiving `packet` over `tech`.
    ///
    /// A missing transmit record — never observed, fully claimed, or
    /// purged — degrades the event (no transmit echo) but never drops it.
    pub fn receive<P: SimulationProbe>(
        &mut self,
        probe: &P,
        tech: LinkTech,
        packet: PacketHandle,
        receiver: NodeId,
    ) {
        let now = probe.now();
        let uid = self.tagger.lookup(packet);
        let echo = uid.and_then(|uid| self.pending.record_rx(tech, uid, receiver));
        if echo.is_none() {
            debug!(
                %tech,
                node = receiver.0,
                "receive without a matching transmit record"
            );
        }

        if !self.should_serialize(now) {
            return;
        }
        if tech.is_wireless() {
            self.wireless_rx_recorded = true;
        }
        self.emit(&TraceEvent::Rx {
            uid: uid.unwrap_or(PacketUid::NONE),
            to: receiver,
            time: now,
            tx: echo.map(|e| TxRef {
                from: e.sender,
                tx_time: e.tx_time,
            }),
        });
    }

    /// Receive notification that identifies the device by link-layer
    /// address instead of node (wide-area wireless and cellular paths).
    ///
    /// # Errors
    ///
    /// Grid addresses fail the MAC conversion explicitly; MAC addresses
    /// that were never [`register_device`](Self::register_device)d fail
    /// with [`RecorderError::UnknownAddress`].
    pub fn receive_by_addr<P: SimulationProbe>(
        &mut self,
        probe: &P,
        tech: LinkTech,
        packet: PacketHandle,
        addr: LinkLayerAddr,
    ) -> RecorderResult<()> {
        let mac = addr.as_mac48()?;
        let node = *self
            .addr_map
            .get(&mac)
            .ok_or(RecorderError::UnknownAddress(addr))?;
        self.receive(probe, tech, packet, node);
        Ok(())
    }

    /// The periodic tick: sweep every node's position, emit the moves, then
    /// purge stale pending records.  The engine schedules this at the
    /// configured poll interval.
    pub fn poll<P: SimulationProbe>(&mut self, probe: &P) {
        let now = probe.now();
        let nodes = probe.node_ids();
        let moved = self.tracker.poll(probe, &nodes, &mut self.rng);

        if self.should_serialize(now) {
            for (node, pos) in moved {
                self.emit(&TraceEvent::Position {
                    node,
                    time: now,
                    pos,
                });
            }
        }

        self.pending.purge_all(now, self.config.purge_max_age);
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// `true` between a successful `start` and `stop`.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// `true` once recording has permanently degraded to a no-op (failed
    /// open, or a write error mid-run).
    pub fn is_failed(&self) -> bool {
        self.open_failed || self.session.as_ref().is_some_and(OutputSession::is_failed)
    }

    /// Take the first stored write error, if any.
    pub fn take_output_error(&mut self) -> Option<OutputError> {
        self.session.as_mut().and_then(OutputSession::take_error)
    }

    /// Events serialized so far this run, across all rotated files.
    pub fn event_count(&self) -> u64 {
        self.session
            .as_ref()
            .map(OutputSession::events_total)
            .unwrap_or(0)
    }

    /// The output coordinate space: all observed positions plus margin.
    pub fn bounds(&self) -> TopoBounds {
        self.tracker.bounds().with_margin(BOUNDS_MARGIN)
    }

    /// The configured poll interval, for whoever schedules the recurring
    /// [`poll`](Self::poll) callback.
    pub fn poll_interval(&self) -> SimTime {
        self.config.poll_interval
    }

    /// In-flight transmit records across all technologies (bounded by
    /// purge).
    pub fn pending_count(&self) -> usize {
        self.pending.pending_total()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Serialization gate: recording must be active and `now` inside the
    /// configured window.  Mutation is never gated.
    fn should_serialize(&self, now: SimTime) -> bool {
        self.started && self.config.window.contains(now)
    }

    fn emit(&mut self, event: &TraceEvent) {
        if let Some(session) = self.session.as_mut() {
            session.write_event(event);
        }
    }
}
