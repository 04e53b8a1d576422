//! Tests for run preparation and per-pixel synthesis in the executor

#[cfg(test)]
mod tests {
    use resynth::SynthesisError;
    use resynth::algorithm::cache::CacheStats;
    use resynth::algorithm::executor::{Resynthesizer, SynthesisConfig, synthesize};
    use resynth::algorithm::schedule::PolishMode;
    use resynth::spatial::{Canvas, Coord, Pixel, Tiling};

    fn gradient(width: usize, height: usize, depth: usize) -> Canvas {
        let data = (0..width * height * depth)
            .map(|i| ((i * 37) % 251) as u8)
            .collect();
        Canvas::from_raw(width, height, depth, data).expect("valid buffer")
    }

    fn assert_invariants(corpus: &Canvas, output: &Canvas, run: &Resynthesizer) {
        let channels = output.depth();
        for y in 0..output.height() as i32 {
            for x in 0..output.width() as i32 {
                let position = Coord::new(x, y);
                let status = run.status().get(position).copied().expect("inside");
                assert!(status.has_value);
                let source = status.source.expect("committed");
                assert!(corpus.contains(source));

                let written = output.pixel(position).expect("inside");
                let original = corpus.pixel(source).expect("inside");
                assert_eq!(written.channels(channels), original.channels(channels));
            }
        }
    }

    #[test]
    fn test_zero_area_is_rejected() {
        let corpus = gradient(4, 4, 3);

        assert!(matches!(
            Resynthesizer::new(corpus.clone(), 0, 8, SynthesisConfig::default(), 1),
            Err(SynthesisError::InvalidInputGeometry {
                corpus: (4, 4),
                output: (0, 8)
            })
        ));

        let empty = Canvas::new(0, 3, 3).expect("valid depth");
        assert!(matches!(
            Resynthesizer::new(empty, 8, 8, SynthesisConfig::default(), 1),
            Err(SynthesisError::InvalidInputGeometry { .. })
        ));
    }

    #[test]
    fn test_out_of_range_parameters_are_rejected() {
        let invalid = [
            SynthesisConfig {
                autism: 1.5,
                ..SynthesisConfig::default()
            },
            SynthesisConfig {
                autism: f64::NAN,
                ..SynthesisConfig::default()
            },
            SynthesisConfig {
                neighbors: 2000,
                ..SynthesisConfig::default()
            },
            SynthesisConfig {
                tries: 70_000,
                ..SynthesisConfig::default()
            },
            SynthesisConfig {
                polish: 10,
                ..SynthesisConfig::default()
            },
            SynthesisConfig {
                magic: 256,
                ..SynthesisConfig::default()
            },
        ];

        for config in invalid {
            assert!(config.validate().is_err());
            assert!(matches!(
                Resynthesizer::new(gradient(4, 4, 1), 4, 4, config, 1),
                Err(SynthesisError::InvalidParameter { .. })
            ));
        }
        assert!(SynthesisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_run_covers_every_pixel() {
        let corpus = gradient(6, 5, 3);
        let mut run =
            Resynthesizer::new(corpus.clone(), 9, 7, SynthesisConfig::default(), 3).expect("run");
        run.run_to_completion();

        assert!(run.is_complete());
        assert_eq!(run.status().completed(), 63);
        assert_invariants(&corpus, run.output(), &run);
    }

    #[test]
    fn test_polished_run_keeps_invariants() {
        let corpus = gradient(5, 5, 1);
        let config = SynthesisConfig {
            polish: 2,
            tiling: Tiling::NONE,
            ..SynthesisConfig::default()
        };
        let mut run = Resynthesizer::new(corpus.clone(), 8, 8, config, 21).expect("run");

        assert!(run.total_steps() > 64);
        run.run_to_completion();
        assert_eq!(run.iteration, run.total_steps());
        assert_invariants(&corpus, run.output(), &run);
    }

    #[test]
    fn test_steps_consume_the_order() {
        let config = SynthesisConfig {
            magic: 0,
            ..SynthesisConfig::default()
        };
        let mut run = Resynthesizer::new(gradient(3, 3, 1), 4, 4, config, 8).expect("run");

        assert_eq!(run.total_steps(), 16);
        assert!(run.execute_step());
        assert_eq!(run.iteration, 1);
        assert_eq!(run.order.len(), 15);
        assert_eq!(run.status().completed(), 1);

        while run.execute_step() {}
        assert!(!run.execute_step());
        assert_eq!(run.iteration, 16);
    }

    #[test]
    fn test_same_seed_same_output() {
        let corpus = gradient(8, 8, 3);
        let first = synthesize(corpus.clone(), 12, 12, SynthesisConfig::default(), 99).expect("run");
        let second = synthesize(corpus, 12, 12, SynthesisConfig::default(), 99).expect("run");

        assert_eq!(first.output, second.output);
    }

    #[test]
    fn test_alpha_is_dropped_from_output() {
        let corpus = gradient(4, 4, 4);
        let run = Resynthesizer::new(corpus, 4, 4, SynthesisConfig::default(), 2).expect("run");

        assert_eq!(run.channels(), 3);
        assert_eq!(run.output().depth(), 3);
    }

    // Without neighbors or random tries nothing is evaluated and the fallback sticks
    #[test]
    fn test_no_candidates_falls_back_to_origin() {
        let corpus = gradient(4, 4, 1);
        let config = SynthesisConfig {
            neighbors: 0,
            tries: 0,
            ..SynthesisConfig::default()
        };
        let result = synthesize(corpus.clone(), 5, 5, config, 6).expect("run");
        let origin = corpus.pixel(Coord::new(0, 0)).expect("inside");

        assert!(
            result
                .status
                .iter()
                .all(|status| status.source == Some(Coord::new(0, 0)))
        );
        assert!(result.output.view().iter().all(|&v| v == origin.r()));
    }

    #[test]
    fn test_uniform_corpus_gives_uniform_output() {
        let corpus = Canvas::from_raw(3, 3, 3, [12u8, 34, 56].repeat(9)).expect("valid buffer");
        let result = synthesize(corpus, 7, 5, SynthesisConfig::default(), 13).expect("run");

        assert_eq!(result.output.into_raw(), [12u8, 34, 56].repeat(35));
    }

    #[test]
    fn test_legacy_polish_fails_at_order_limit() {
        let config = SynthesisConfig {
            polish: 1,
            polish_mode: PolishMode::Legacy,
            order_limit: 4096,
            ..SynthesisConfig::default()
        };

        assert!(matches!(
            Resynthesizer::new(gradient(4, 4, 1), 8, 8, config, 1),
            Err(SynthesisError::AllocationFailure { .. })
        ));
    }

    #[test]
    fn test_default_run_visits_each_pixel_once() {
        let run = Resynthesizer::new(gradient(4, 4, 1), 4, 4, SynthesisConfig::default(), 1)
            .expect("run");

        assert_eq!(run.total_steps(), 16);
    }

    // With no random tries, a pixel either continues a neighbor's source or
    // keeps the previous commit when every continuation leaves the corpus
    #[test]
    fn test_pixels_continue_neighbor_sources() {
        let corpus = gradient(6, 6, 1);
        let config = SynthesisConfig {
            neighbors: 8,
            tries: 0,
            ..SynthesisConfig::default()
        };
        let mut run = Resynthesizer::new(corpus, 5, 5, config, 17).expect("run");
        let mut previous = Coord::new(0, 0);

        while let Some(&position) = run.order.last() {
            assert!(run.execute_step());
            let source = run
                .status()
                .get(position)
                .and_then(|status| status.source)
                .expect("committed");

            let continuations: Vec<Coord> = run
                .neighbors
                .as_slice()
                .iter()
                .filter_map(|neighbor| neighbor.coherent_candidate())
                .filter(|&candidate| run.corpus.contains(candidate))
                .collect();

            if continuations.is_empty() {
                assert_eq!(source, previous);
            } else {
                assert!(continuations.contains(&source));
            }
            previous = source;
        }
    }

    // Two coherent neighbors propose the same corpus position; it is scored once
    // and a neighbor whose continuation leaves the corpus is skipped
    #[test]
    fn test_duplicate_continuations_are_scored_once() {
        let config = SynthesisConfig {
            tiling: Tiling::NONE,
            tries: 0,
            ..SynthesisConfig::default()
        };
        let mut run = Resynthesizer::new(gradient(8, 8, 1), 4, 4, config, 1).expect("run");

        for (position, source) in [
            (Coord::new(2, 1), Coord::new(6, 5)),
            (Coord::new(1, 1), Coord::new(5, 5)),
            (Coord::new(3, 2), Coord::new(0, 0)),
        ] {
            run.status.mark_valued(position);
            run.status.commit(position, source);
            run.output.set_pixel(position, Pixel([255, 0, 0, 0]));
        }
        run.order = vec![Coord::new(2, 2)];

        assert!(run.execute_step());
        assert_eq!(
            run.status().get(Coord::new(2, 2)).and_then(|s| s.source),
            Some(Coord::new(6, 6))
        );
        assert_eq!(run.tried.stats, CacheStats { hits: 1, misses: 1 });
        assert_eq!(
            run.output().pixel(Coord::new(2, 2)),
            run.corpus.pixel(Coord::new(6, 6))
        );
    }

    #[test]
    fn test_legacy_polish_is_capped_by_canvas_area() {
        let config = SynthesisConfig {
            polish: 1,
            polish_mode: PolishMode::Legacy,
            ..SynthesisConfig::default()
        };

        assert!(matches!(
            Resynthesizer::new(gradient(4, 4, 1), 16, 16, config, 1),
            Err(SynthesisError::AllocationFailure { .. })
        ));
    }
}
