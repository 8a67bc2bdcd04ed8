//! Unit and integration tests for formats, sinks, and the session.

#[cfg(test)]
mod format_xml {
    use nt_core::{NodeId, PacketUid, SimTime, Vec3};
    use nt_topology::TopoBounds;

    use crate::event::{TraceEvent, TxRef};
    use crate::format::{TraceFormat, XmlFormat};

    fn bounds() -> TopoBounds {
        let mut b = TopoBounds::new();
        b.widen(Vec3::new(0.0, 0.0, 0.0));
        b.widen(Vec3::new(10.0, 5.0, 0.0));
        b
    }

    #[test]
    fn preamble_and_epilogue_pair() {
        let f = XmlFormat;
        assert!(f.preamble().starts_with("<?xml"));
        assert!(f.preamble().contains("<anim"));
        assert_eq!(f.epilogue(), "</anim>\n");
    }

    #[test]
    fn topology_block() {
        let f = XmlFormat;
        let open = f.render(&TraceEvent::TopologyStart { bounds: bounds() });
        assert_eq!(open, "<topology minX=\"0\" minY=\"0\" maxX=\"10\" maxY=\"5\">\n");
        let close = f.render(&TraceEvent::TopologyEnd);
        assert_eq!(close, "</topology>\n");
    }

    #[test]
    fn node_with_and_without_label() {
        let f = XmlFormat;
        let plain = f.render(&TraceEvent::Node {
            id: NodeId(3),
            pos: Vec3::new(1.5, 2.0, 0.0),
            label: None,
        });
        assert_eq!(plain, "  <node id=\"3\" locX=\"1.5\" locY=\"2\"/>\n");

        let labeled = f.render(&TraceEvent::Node {
            id: NodeId(3),
            pos: Vec3::new(1.5, 2.0, 0.0),
            label: Some("gateway".to_owned()),
        });
        assert!(labeled.contains("descr=\"gateway\""));
    }

    #[test]
    fn label_is_escaped() {
        let f = XmlFormat;
        let rendered = f.render(&TraceEvent::Node {
            id: NodeId(0),
            pos: Vec3::default(),
            label: Some("a<b & \"c\"".to_owned()),
        });
        assert!(rendered.contains("a&lt;b &amp; &quot;c&quot;"));
        assert!(!rendered.contains("a<b"));
    }

    #[test]
    fn wireless_tx_self_closes_without_meta() {
        let f = XmlFormat;
        let rendered = f.render(&TraceEvent::WirelessTx {
            uid: PacketUid(7),
            from: NodeId(1),
            time: SimTime::from_secs(1),
            range: 50.0,
            meta: None,
        });
        assert_eq!(
            rendered,
            "<wpacket uid=\"7\" fromId=\"1\" t=\"1\" range=\"50\"/>\n"
        );
    }

    #[test]
    fn meta_nests_inside_tx_element() {
        let f = XmlFormat;
        let rendered = f.render(&TraceEvent::WiredTx {
            uid: PacketUid(7),
            from: NodeId(1),
            time: SimTime::from_secs(1),
            meta: Some("Ethernet proto=0x0800".to_owned()),
        });
        assert!(rendered.starts_with("<packet uid=\"7\""));
        assert!(rendered.contains("<meta info=\"Ethernet proto=0x0800\"/>"));
        assert!(rendered.trim_end().ends_with("</packet>"));
    }

    #[test]
    fn rx_carries_tx_echo_when_matched() {
        let f = XmlFormat;
        let matched = f.render(&TraceEvent::Rx {
            uid: PacketUid(7),
            to: NodeId(2),
            time: SimTime::from_secs_f64(1.2),
            tx: Some(TxRef {
                from: NodeId(1),
                tx_time: SimTime::from_secs(1),
            }),
        });
        assert_eq!(
            matched,
            "<rx uid=\"7\" toId=\"2\" t=\"1.2\" fromId=\"1\" txTime=\"1\"/>\n"
        );

        let miss = f.render(&TraceEvent::Rx {
            uid: PacketUid(7),
            to: NodeId(2),
            time: SimTime::from_secs_f64(1.2),
            tx: None,
        });
        assert_eq!(miss, "<rx uid=\"7\" toId=\"2\" t=\"1.2\"/>\n");
    }

    #[test]
    fn placeholder_is_the_zero_packet() {
        let f = XmlFormat;
        assert_eq!(
            f.render(&TraceEvent::Placeholder),
            "<wpacket uid=\"0\" fromId=\"0\" t=\"0\" range=\"0\"/>\n"
        );
    }
}

#[cfg(test)]
mod format_legacy {
    use nt_core::{NodeId, PacketUid, SimTime, Vec3};

    use crate::event::{TraceEvent, TxRef};
    use crate::format::{LegacyFormat, TraceFormat};

    #[test]
    fn no_preamble_or_epilogue() {
        let f = LegacyFormat;
        assert!(f.preamble().is_empty());
        assert!(f.epilogue().is_empty());
    }

    #[test]
    fn one_record_per_line() {
        let f = LegacyFormat;
        assert_eq!(
            f.render(&TraceEvent::Link {
                from: NodeId(0),
                to: NodeId(1)
            }),
            "link 0 1\n"
        );
        assert_eq!(
            f.render(&TraceEvent::Position {
                node: NodeId(4),
                time: SimTime::from_secs_f64(0.25),
                pos: Vec3::new(3.0, 4.0, 0.0),
            }),
            "pos 4 0.25 3 4\n"
        );
    }

    #[test]
    fn rx_tokens_match_and_miss() {
        let f = LegacyFormat;
        let matched = f.render(&TraceEvent::Rx {
            uid: PacketUid(9),
            to: NodeId(2),
            time: SimTime::from_secs_f64(1.2),
            tx: Some(TxRef {
                from: NodeId(1),
                tx_time: SimTime::from_secs(1),
            }),
        });
        assert_eq!(matched, "rx 9 2 1.2 1 1\n");

        let miss = f.render(&TraceEvent::Rx {
            uid: PacketUid(9),
            to: NodeId(2),
            time: SimTime::from_secs_f64(1.2),
            tx: None,
        });
        assert_eq!(miss, "rx 9 2 1.2\n");
    }

    #[test]
    fn meta_becomes_its_own_line() {
        let f = LegacyFormat;
        let rendered = f.render(&TraceEvent::WirelessTx {
            uid: PacketUid(3),
            from: NodeId(0),
            time: SimTime::from_secs(2),
            range: 25.0,
            meta: Some("hdr".to_owned()),
        });
        assert_eq!(rendered, "wtx 3 0 2 25\nmeta 3 hdr\n");
    }

    #[test]
    fn topology_end_has_no_line() {
        let f = LegacyFormat;
        assert!(f.render(&TraceEvent::TopologyEnd).is_empty());
    }
}

#[cfg(test)]
mod sinks {
    use std::io::Read;
    use std::net::TcpStream;
    use std::thread;
    use std::time::Duration;

    use tempfile::TempDir;

    use crate::sink::{FileSink, RecordSink, SocketSink};

    #[test]
    fn file_sink_truncates_and_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.xml");
        std::fs::write(&path, "stale previous run").unwrap();

        let mut sink = FileSink::create(&path).unwrap();
        sink.write_fully(b"fresh").unwrap();
        sink.close().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn socket_sink_accepts_then_streams() {
        const PORT: u16 = 47_611;

        let reader = thread::spawn(|| {
            // The listener may not be up yet; retry until the bind happens.
            let mut stream = loop {
                match TcpStream::connect(("127.0.0.1", PORT)) {
                    Ok(s) => break s,
                    Err(_) => thread::sleep(Duration::from_millis(10)),
                }
            };
            let mut buf = String::new();
            stream.read_to_string(&mut buf).unwrap();
            buf
        });

        let mut sink = SocketSink::listen(PORT).unwrap();
        sink.write_fully(b"<anim ver=\"1\">\n").unwrap();
        sink.write_fully(b"</anim>\n").unwrap();
        sink.close().unwrap();

        let received = reader.join().unwrap();
        assert_eq!(received, "<anim ver=\"1\">\n</anim>\n");
    }
}

#[cfg(test)]
mod session {
    use std::cell::RefCell;
    use std::rc::Rc;

    use nt_core::{NodeId, SimTime, Vec3};
    use tempfile::TempDir;

    use crate::event::TraceEvent;
    use crate::format::FormatKind;
    use crate::session::{OutputSession, OutputTarget};

    fn pos_event(node: u32, secs: u64) -> TraceEvent {
        TraceEvent::Position {
            node: NodeId(node),
            time: SimTime::from_secs(secs),
            pos: Vec3::new(node as f64, 0.0, 0.0),
        }
    }

    fn file_target(dir: &TempDir, ceiling: u64) -> OutputTarget {
        OutputTarget::File {
            path: dir.path().join("trace.xml"),
            max_events_per_file: ceiling,
        }
    }

    #[test]
    fn preamble_does_not_count_as_event() {
        let dir = TempDir::new().unwrap();
        let session = OutputSession::open(file_target(&dir, 10), FormatKind::Xml).unwrap();
        assert_eq!(session.events_total(), 0);
        assert_eq!(session.events_in_file(), 0);
    }

    #[test]
    fn rotation_after_exactly_ceiling_events() {
        let dir = TempDir::new().unwrap();
        let mut session = OutputSession::open(file_target(&dir, 3), FormatKind::Xml).unwrap();

        for i in 0..7u64 {
            session.write_event(&pos_event(i as u32, i));
        }
        session.close().unwrap();

        assert_eq!(session.events_total(), 7);
        assert_eq!(session.file_seq(), 2);

        let first = std::fs::read_to_string(dir.path().join("trace.xml")).unwrap();
        let second = std::fs::read_to_string(dir.path().join("trace.xml-1")).unwrap();
        let third = std::fs::read_to_string(dir.path().join("trace.xml-2")).unwrap();

        assert_eq!(first.matches("<node").count(), 3);
        assert_eq!(second.matches("<node").count(), 3);
        assert_eq!(third.matches("<node").count(), 1);

        // Events landed strictly in arrival order across the family.
        assert!(first.contains("id=\"0\"") && first.contains("id=\"2\""));
        assert!(second.contains("id=\"3\"") && second.contains("id=\"5\""));
        assert!(third.contains("id=\"6\""));

        // Each file in the family is independently well-formed.
        for content in [&first, &second, &third] {
            assert!(content.starts_with("<?xml"));
            assert!(content.trim_end().ends_with("</anim>"));
        }
    }

    #[test]
    fn old_file_sees_no_writes_after_rotation() {
        let dir = TempDir::new().unwrap();
        let mut session = OutputSession::open(file_target(&dir, 2), FormatKind::Xml).unwrap();

        session.write_event(&pos_event(0, 0));
        session.write_event(&pos_event(1, 1));
        let after_rotation = std::fs::read_to_string(dir.path().join("trace.xml")).unwrap();

        session.write_event(&pos_event(2, 2));
        session.close().unwrap();

        let final_first = std::fs::read_to_string(dir.path().join("trace.xml")).unwrap();
        assert_eq!(after_rotation, final_first, "rotated-away file is frozen");
    }

    #[test]
    fn no_rotation_below_ceiling() {
        let dir = TempDir::new().unwrap();
        let mut session = OutputSession::open(file_target(&dir, 1000), FormatKind::Xml).unwrap();
        for i in 0..5u64 {
            session.write_event(&pos_event(i as u32, i));
        }
        assert_eq!(session.file_seq(), 0);
        session.close().unwrap();
    }

    #[test]
    fn close_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut session = OutputSession::open(file_target(&dir, 10), FormatKind::Xml).unwrap();
        session.close().unwrap();
        session.close().unwrap();

        // Writes after close are silent no-ops.
        session.write_event(&pos_event(0, 0));
        assert_eq!(session.events_total(), 0);
    }

    #[test]
    fn tap_observes_written_strings() {
        let dir = TempDir::new().unwrap();
        let mut session = OutputSession::open(file_target(&dir, 10), FormatKind::Legacy).unwrap();

        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let seen_by_tap = Rc::clone(&seen);
        session.set_tap(Box::new(move |s| seen_by_tap.borrow_mut().push(s.to_owned())));

        session.write_event(&pos_event(1, 2));
        session.close().unwrap();

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0], "pos 1 2 1 0\n");
    }

    #[test]
    fn open_failure_surfaces() {
        let target = OutputTarget::File {
            path: std::path::PathBuf::from("/nonexistent-dir/trace.xml"),
            max_events_per_file: 10,
        };
        assert!(OutputSession::open(target, FormatKind::Xml).is_err());
    }

    #[test]
    fn rotation_failure_degrades_to_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("trace.xml");
        std::fs::create_dir(dir.path().join("out")).unwrap();
        let target = OutputTarget::File {
            path,
            max_events_per_file: 1,
        };
        let mut session = OutputSession::open(target, FormatKind::Xml).unwrap();

        // Pull the directory out from under the next rotation.
        std::fs::remove_dir_all(dir.path().join("out")).unwrap();

        session.write_event(&pos_event(0, 0)); // triggers the failing rotation
        assert!(session.is_failed());
        assert!(session.take_error().is_some());

        // Degraded: later writes are silent no-ops and close still succeeds.
        session.write_event(&pos_event(1, 1));
        assert_eq!(session.events_total(), 1);
        session.close().unwrap();
    }
}
