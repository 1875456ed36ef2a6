//! Integration tests for pfx-rs crates.
//!
//! End-to-end checks across core types, the resolver and engine, and the
//! sequencer.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use parking_lot::Mutex;
    use pfx_core::{Hsv, Pixel, PixelBuffer};
    use pfx_ops::{
        apply_all, apply_request, execute_sequential, Operation, OpsError, Outcome, RawOptions,
        Request, RequestList,
    };
    use pfx_queue::{Codec, QueueResult, RawCodec, RawImage, Sequencer};
    use std::sync::Arc;

    const TINT: &str = include_str!("../data/tint.yaml");
    const UNKNOWN_MODES: &str = include_str!("../data/unknown_modes.yaml");

    fn photo(width: u32, height: u32) -> PixelBuffer {
        let data = (0..width * height)
            .flat_map(|i| {
                let (x, y) = (i % width, i / width);
                [(x * 29 % 256) as u8, (y * 47 % 256) as u8, ((x * y) % 256) as u8, (128 + x % 128) as u8]
            })
            .collect();
        PixelBuffer::from_raw(width, height, data).unwrap()
    }

    fn bytes(buf: &PixelBuffer, x: i64, y: i64) -> [u8; 4] {
        buf.get(x, y).map(Pixel::to_bytes).unwrap()
    }

    /// YAML chain: grayscale -> colorize replace r -> opacity
    #[test]
    fn test_yaml_chain() {
        let chain = RequestList::from_yaml(TINT).unwrap();
        let mut buf = PixelBuffer::filled(4, 3, [30, 60, 90, 255]);

        let outcomes = apply_all(&mut buf, &chain.requests);
        assert!(outcomes.iter().all(Outcome::is_applied));
        for (_, _, px) in buf.pixels() {
            assert_eq!(px.to_bytes(), [128, 60, 60, 128]);
        }
    }

    #[test]
    fn test_json_and_yaml_agree() {
        let yaml = RequestList::from_yaml(TINT).unwrap();
        let json = RequestList::from_json(
            r#"[
                {"operation": "grayscale", "options": {"mode": "average"}},
                {"operation": "colorize", "options": {"mode": "replace", "r": 50}},
                {"operation": "opacity", "options": {"opacity": 50}}
            ]"#,
        )
        .unwrap();

        let mut a = photo(16, 9);
        let mut b = a.clone();
        apply_all(&mut a, &yaml.requests);
        apply_all(&mut b, &json.requests);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_modes_leave_buffer_identical() {
        let chain = RequestList::from_yaml(UNKNOWN_MODES).unwrap();
        let original = photo(12, 7);
        let mut buf = original.clone();

        let outcomes = apply_all(&mut buf, &chain.requests);
        assert_eq!(outcomes.len(), 8);
        assert!(outcomes.iter().all(|o| matches!(o, Outcome::Skipped(_))));
        assert_eq!(buf.as_bytes(), original.as_bytes());
    }

    #[test]
    fn test_legacy_effect_spelling() {
        let original = photo(10, 10);
        for (effect, options) in [
            ("inverse", RawOptions::default()),
            ("solarize", RawOptions { solarize: Some(30.0), ..Default::default() }),
            ("blur", RawOptions { radius: Some(2), ..Default::default() }),
        ] {
            let mut dotted = original.clone();
            let mut legacy = original.clone();
            apply_request(&mut dotted, &Request::new(format!("effect.{effect}"), options.clone()));
            apply_request(
                &mut legacy,
                &Request::new("effect", RawOptions { mode: Some(effect.into()), ..options }),
            );
            assert_eq!(dotted, legacy, "{effect}");
        }
    }

    #[test]
    fn test_hsv_roundtrip_within_one() {
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let rgb = [r as f32, g as f32, b as f32];
                    let back = Hsv::from_rgb(rgb).to_rgb();
                    for c in 0..3 {
                        assert_abs_diff_eq!(back[c], rgb[c], epsilon = 1.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_negative_hue_is_normalized() {
        match Operation::resolve(&Request::hue(-30.0)).unwrap() {
            Operation::Hue(shift) => assert_abs_diff_eq!(shift.hue, 330.0, epsilon = 1e-4),
            other => panic!("expected hue, got {other:?}"),
        }
    }

    #[test]
    fn test_hue_on_achromatic_pixels() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.set(0, 0, Pixel::new(0.0, 0.0, 0.0, 255.0));
        buf.set(1, 0, Pixel::new(128.0, 128.0, 128.0, 255.0));
        let request = Request::new(
            "hue",
            RawOptions { hue: Some(200.0), saturation: Some(0.0), value: Some(0.0), ..Default::default() },
        );
        assert!(apply_request(&mut buf, &request).is_applied());
        assert_eq!(bytes(&buf, 0, 0), [0, 0, 0, 255]);
        assert_eq!(bytes(&buf, 1, 0), [128, 128, 128, 255]);
    }

    #[test]
    fn test_documented_pixels() {
        let mut gray = PixelBuffer::filled(1, 1, [30, 60, 90, 77]);
        apply_request(&mut gray, &Request::grayscale("average"));
        assert_eq!(bytes(&gray, 0, 0), [60, 60, 60, 77]);

        let mut dark = PixelBuffer::filled(1, 1, [10, 10, 10, 255]);
        let mut light = PixelBuffer::filled(1, 1, [240, 240, 240, 255]);
        apply_request(&mut dark, &Request::solarize());
        apply_request(&mut light, &Request::solarize());
        assert_eq!(bytes(&dark, 0, 0), [245, 245, 245, 255]);
        assert_eq!(bytes(&light, 0, 0), [240, 240, 240, 255]);

        for alpha in [0u8, 13, 255] {
            let mut buf = PixelBuffer::filled(1, 1, [1, 2, 3, alpha]);
            let request = Request::new(
                "opacity",
                RawOptions {
                    mode: Some("replace".into()),
                    opacity: Some(50.0),
                    ..Default::default()
                },
            );
            apply_request(&mut buf, &request);
            assert!(matches!(bytes(&buf, 0, 0)[3], 127 | 128));
        }
    }

    #[test]
    fn test_blur_radius_zero_and_inverse_twice() {
        let original = photo(20, 11);

        let mut buf = original.clone();
        apply_request(&mut buf, &Request::blur(0));
        assert_eq!(buf, original);

        apply_all(&mut buf, &[Request::inverse(), Request::inverse()]);
        assert_eq!(buf, original);
    }

    #[test]
    fn test_engine_variants_agree_on_chain() {
        let chain = RequestList::from_yaml(
            "- operation: effect.blur\n  options: { radius: 3 }\n\
             - operation: hue\n  options: { mode: multiply, hue: 75, saturation: 40, value: -20 }\n\
             - operation: colorize\n  options: { grayscale: luminosity, g: 10 }\n",
        )
        .unwrap();
        let mut par = photo(40, 25);
        let mut seq = par.clone();
        apply_all(&mut par, &chain.requests);
        for request in &chain.requests {
            let op = Operation::resolve(request).unwrap();
            execute_sequential(&mut seq, &op);
        }
        assert_eq!(par, seq);
    }

    #[test]
    fn test_custom_without_function_is_skipped() {
        let chain = RequestList::from_yaml("- operation: custom\n").unwrap();
        let mut buf = photo(3, 3);
        let outcome = apply_request(&mut buf, &chain.requests[0]);
        assert!(matches!(outcome, Outcome::Skipped(OpsError::MissingCustomFunction)));
    }

    /// Codec that logs what each job decoded and encoded.
    #[derive(Default, Clone)]
    struct Journal {
        decoded: Arc<Mutex<Vec<Vec<u8>>>>,
        encoded: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl Codec for Journal {
        type Source = RawImage;

        async fn decode(&self, source: &RawImage) -> QueueResult<PixelBuffer> {
            tokio::task::yield_now().await;
            self.decoded.lock().push(source.data.clone());
            RawCodec.decode(source).await
        }

        async fn encode(&self, buffer: PixelBuffer) -> QueueResult<RawImage> {
            tokio::task::yield_now().await;
            self.encoded.lock().push(buffer.as_bytes().to_vec());
            RawCodec.encode(buffer).await
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_sequencer_matches_direct_chain() {
        let seq = Sequencer::new(RawCodec);
        seq.register("img", RawImage::from(photo(24, 16)));

        let chain = RequestList::from_yaml(TINT).unwrap();
        let mut pending = seq.submit_all(&"img", chain.requests.clone()).unwrap();
        pending.push(seq.submit(&"img", Request::blur(2)).unwrap());
        for p in pending {
            assert!(p.await.unwrap().is_applied());
        }

        let mut expected = photo(24, 16);
        apply_all(&mut expected, &chain.requests);
        apply_request(&mut expected, &Request::blur(2));
        assert_eq!(seq.source(&"img").unwrap().data, expected.as_bytes());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_each_job_reads_previous_output() {
        let journal = Journal::default();
        let seq = Sequencer::new(journal.clone());
        seq.register(1u8, RawImage::from(photo(8, 8)));

        let t1 = seq.submit(&1, Request::hue(90.0)).unwrap();
        let t2 = seq.submit(&1, Request::blur(1)).unwrap();
        let t3 = seq.submit(&1, Request::colorize("multiply", [10.0, -10.0, 0.0])).unwrap();
        let (c, a, b) = tokio::join!(t3, t1, t2);
        assert!(a.is_ok() && b.is_ok() && c.is_ok());

        let decoded = journal.decoded.lock().clone();
        let encoded = journal.encoded.lock().clone();
        assert_eq!(decoded.len(), 3);
        assert_eq!(encoded.len(), 3);
        assert_eq!(decoded[0], photo(8, 8).as_bytes());
        assert_eq!(decoded[1], encoded[0]);
        assert_eq!(decoded[2], encoded[1]);
        assert_eq!(seq.source(&1).unwrap().data, encoded[2]);
    }

    #[tokio::test]
    async fn test_concurrent_targets() {
        let seq = Sequencer::new(RawCodec);
        for key in 0..4u32 {
            seq.register(key, RawImage::from(photo(10 + key, 5)));
        }
        let jobs: Vec<_> = (0..4u32)
            .map(|key| seq.submit_all(&key, [Request::inverse(), Request::grayscale("natural")]).unwrap())
            .collect();
        for batch in jobs {
            for p in batch {
                p.await.unwrap();
            }
        }
        for key in 0..4u32 {
            let mut expected = photo(10 + key, 5);
            apply_all(&mut expected, &[Request::inverse(), Request::grayscale("natural")]);
            assert_eq!(seq.source(&key).unwrap().data, expected.as_bytes());
        }
    }
}
