//! End-to-end protocol scenarios against scripted transports.

#[cfg(test)]
mod tests {
    use crate::test_helpers::{FixedResolver, ScriptedTransport};
    use protocol::{
        Opcode, Outcome, ProtocolConfig, RelaunchMode, Reply, Request, Session, SendErrorKind,
        TargetDescriptor, TransportError, WaitMode, ANY_TRANSACTION, CODE_NOT_HANDLED,
    };
    use wire_types::{codes, FourCc, Query, Value};

    fn documents() -> FourCc {
        FourCc::new(b"docu")
    }

    fn session<'a>(
        transport: &'a ScriptedTransport,
        resolver: &'a FixedResolver,
    ) -> Session<&'a ScriptedTransport, &'a FixedResolver> {
        Session::new(
            transport,
            resolver,
            TargetDescriptor::Name("editor".to_string()),
        )
    }

    fn relaunching_session<'a>(
        transport: &'a ScriptedTransport,
        resolver: &'a FixedResolver,
    ) -> Session<&'a ScriptedTransport, &'a FixedResolver> {
        Session::with_config(
            transport,
            resolver,
            TargetDescriptor::Name("editor".to_string()),
            ProtocolConfig {
                relaunch: RelaunchMode::Always,
                ..ProtocolConfig::default()
            },
        )
    }

    fn unavailable() -> TransportError {
        TransportError::new(-600, "target process gone")
    }

    #[test]
    fn test_get_data_end_to_end() {
        let reply = Reply::default().with_param(
            codes::KEY_DIRECT_OBJECT,
            Value::Text("Report".to_string()).to_wire(),
        );
        let transport = ScriptedTransport::new(vec![Ok(Some(reply))]);
        let resolver = FixedResolver::new(false);
        let session = session(&transport, &resolver);

        let specifier = Query::app_root().by_index(documents(), 1);
        let request = Request::new(Opcode::GET_DATA)
            .with_direct(Value::Query(specifier.clone()));
        let name: String = session.call(&request).unwrap();
        assert_eq!(name, "Report");

        let sends = transport.sends();
        assert_eq!(sends.len(), 1);
        let (envelope, mode, timeout) = &sends[0];
        assert_eq!(envelope.opcode, Opcode::GET_DATA);
        assert_eq!(*mode, WaitMode::WaitForReply);
        assert_eq!(*timeout, 120);

        // The direct parameter is the specifier's record form; the
        // subject is the application root.
        let direct = envelope.param(codes::KEY_DIRECT_OBJECT).unwrap();
        assert_eq!(direct, &specifier.to_wire());
        assert_eq!(
            direct
                .field(codes::KEY_FORM)
                .unwrap()
                .read_code()
                .unwrap(),
            codes::FORM_ABSOLUTE_POSITION
        );
        assert_eq!(direct.field(codes::KEY_DATA).unwrap().read_i32().unwrap(), 1);
        assert_eq!(
            envelope.attribute(codes::ATTR_SUBJECT),
            Some(&Query::app_root().to_wire())
        );
    }

    #[test]
    fn test_relaunch_resends_byte_identical_params() {
        let transport = ScriptedTransport::new(vec![
            Err(unavailable()),
            Ok(Some(Reply::default())),
        ]);
        let resolver = FixedResolver::new(true);
        let session = relaunching_session(&transport, &resolver);

        let request = Request::new(Opcode::GET_DATA)
            .with_target(Query::app_root().by_index(documents(), 2))
            .with_requested_type(codes::TYPE_SINT32);
        session.send(&request).unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 2, "exactly one resend");
        assert_eq!(resolver.resolutions(), 2, "address re-resolved once");
        assert_ne!(sent[0].address, sent[1].address);

        // Parameters are copied byte for byte.
        assert_eq!(
            serde_json::to_string(&sent[0].params).unwrap(),
            serde_json::to_string(&sent[1].params).unwrap()
        );
        // Subject and considerations carry over; the return id does
        // not.
        assert_eq!(
            sent[0].attribute(codes::ATTR_SUBJECT),
            sent[1].attribute(codes::ATTR_SUBJECT)
        );
        assert_eq!(
            sent[0].attribute(codes::ATTR_CONSIDERATIONS),
            sent[1].attribute(codes::ATTR_CONSIDERATIONS)
        );
        assert_ne!(
            sent[0].attribute(codes::ATTR_RETURN_ID),
            sent[1].attribute(codes::ATTR_RETURN_ID)
        );
    }

    #[test]
    fn test_default_policy_does_not_relaunch_get_data() {
        let transport = ScriptedTransport::new(vec![Err(unavailable())]);
        let resolver = FixedResolver::new(true);
        let session = session(&transport, &resolver);

        let err = session.send(&Request::new(Opcode::GET_DATA)).unwrap_err();
        assert_eq!(err.error_number(), Some(-600));
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn test_noop_launch_quirk_is_success() {
        let transport = ScriptedTransport::new(vec![Err(TransportError::new(
            CODE_NOT_HANDLED,
            "event not handled",
        ))]);
        let resolver = FixedResolver::new(false);
        let session = session(&transport, &resolver);

        let outcome = session.send(&Request::new(Opcode::LAUNCH_NOOP)).unwrap();
        assert_eq!(outcome, Outcome::Missing);
    }

    #[test]
    fn test_transaction_abort_swallows_its_own_failure() {
        let transport = ScriptedTransport::new(vec![
            // begin returns the transaction id
            Ok(Some(Reply::default().with_param(
                codes::KEY_DIRECT_OBJECT,
                Value::Int32(11).to_wire(),
            ))),
            // the action's request fails at the application level
            Ok(Some(Reply::default().with_param(
                codes::KEY_ERROR_NUMBER,
                Value::Int32(-1728).to_wire(),
            ))),
            // and the abort itself fails too
            Err(TransportError::new(-609, "connection dropped")),
        ]);
        let resolver = FixedResolver::new(false);
        let session = session(&transport, &resolver);

        let err = session
            .with_transaction(|session| {
                session
                    .send(&Request::new(Opcode::GET_DATA))
                    .map(|_| ())
            })
            .unwrap_err();

        // The original error wins over the abort failure.
        assert_eq!(err.error_number(), Some(-1728));
        assert!(matches!(err.kind, SendErrorKind::Application(_)));

        let sent = transport.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[2].opcode, Opcode::ABORT_TRANSACTION);
        // The action's request and the abort both carried the id.
        for envelope in &sent[1..] {
            assert_eq!(
                envelope
                    .attribute(codes::ATTR_TRANSACTION)
                    .unwrap()
                    .read_i32()
                    .unwrap(),
                11
            );
        }
        // A follow-up request is back to the any-transaction id.
        session.send(&Request::new(Opcode::GET_DATA)).unwrap();
        let last = transport.sent().pop().unwrap();
        assert_eq!(
            last.attribute(codes::ATTR_TRANSACTION)
                .unwrap()
                .read_i32()
                .unwrap(),
            ANY_TRANSACTION
        );
    }

    #[test]
    fn test_transaction_commit_sends_end() {
        let transport = ScriptedTransport::new(vec![
            // begin hands back the transaction id
            Ok(Some(Reply::default().with_param(
                codes::KEY_DIRECT_OBJECT,
                Value::Int32(5).to_wire(),
            ))),
            // the action's result
            Ok(Some(Reply::default().with_param(
                codes::KEY_DIRECT_OBJECT,
                Value::Int32(8).to_wire(),
            ))),
            // end gets the default empty reply
        ]);
        let resolver = FixedResolver::new(false);
        let session = session(&transport, &resolver);

        let pages: i32 = session
            .with_transaction(|session| {
                session.call(
                    &Request::new(Opcode::GET_DATA).with_direct(Value::Query(
                        Query::app_root()
                            .by_index(documents(), 1)
                            .by_property(FourCc::new(b"pcnt")),
                    )),
                )
            })
            .unwrap();
        assert_eq!(pages, 8);
        let sent = transport.sent();
        // The action and the end both ride the begin's id.
        assert_eq!(
            sent[1]
                .attribute(codes::ATTR_TRANSACTION)
                .unwrap()
                .read_i32()
                .unwrap(),
            5
        );
        let opcodes: Vec<Opcode> = sent.iter().map(|e| e.opcode).collect();
        assert_eq!(
            opcodes,
            vec![
                Opcode::BEGIN_TRANSACTION,
                Opcode::GET_DATA,
                Opcode::END_TRANSACTION
            ]
        );
    }

    #[test]
    fn test_queue_reply_returns_the_attached_correlation_id() {
        let transport = ScriptedTransport::new(vec![Ok(None)]);
        let resolver = FixedResolver::new(false);
        let session = session(&transport, &resolver);

        let request = Request::new(Opcode::GET_DATA).with_wait_mode(WaitMode::QueueReply);
        let outcome = session.send(&request).unwrap();
        let envelope = &transport.sent()[0];
        let attached = envelope
            .attribute(codes::ATTR_RETURN_ID)
            .unwrap()
            .read_i32()
            .unwrap();
        assert_eq!(outcome, Outcome::Queued(attached));
        assert_ne!(attached, 0);
    }

    #[test]
    fn test_explicit_timeout_reaches_the_transport() {
        let transport = ScriptedTransport::empty_replies();
        let resolver = FixedResolver::new(false);
        let session = session(&transport, &resolver);

        let request = Request::new(Opcode::GET_DATA).with_timeout_ticks(600);
        session.send(&request).unwrap();
        let (_, _, timeout) = transport.sends()[0].clone();
        assert_eq!(timeout, 600);
    }
}
