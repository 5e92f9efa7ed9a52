use featquant_core::{ClipRange, QuantizerConfig, TargetType};
use half::f16;
use ndarray::{Array, Array2, IxDyn};
use proptest::prelude::*;

fn target_strategy() -> impl Strategy<Value = TargetType> {
    prop::sample::select(TargetType::ALL.to_vec())
}

fn matrix_strategy(range: std::ops::Range<f64>) -> impl Strategy<Value = Array2<f64>> {
    (1usize..16, 1usize..8).prop_flat_map(move |(rows, cols)| {
        prop::collection::vec(range.clone(), rows * cols)
            .prop_map(move |v| Array2::from_shape_vec((rows, cols), v).unwrap())
    })
}

/// Worst-case reconstruction error for values within a bound of 10.
fn tolerance(target: TargetType) -> f64 {
    match target {
        TargetType::Int8 => 0.1,
        TargetType::Int16 => 1e-3,
        TargetType::Int32 => 1e-7,
        // 11-bit mantissa: relative error 2^-11 of the bound
        TargetType::Float16 => 10.0 / 2048.0,
        TargetType::Float32 => 1e-5,
    }
}

// Property 1: Round trip stays within one quantization step
proptest! {
    #[test]
    fn prop_roundtrip_within_bound(
        x in matrix_strategy(-10.0..10.0),
        target in target_strategy()
    ) {
        let fitted = QuantizerConfig::new(target).with_max_value(10.0).fit(&x).unwrap();
        let back = fitted.inverse_transform_quantized(&fitted.transform(&x));

        for (i, (&orig, &recon)) in x.iter().zip(back.iter()).enumerate() {
            let error = (orig - recon).abs();
            prop_assert!(
                error <= tolerance(target),
                "{} roundtrip error at {}: {} vs {} (error {})",
                target, i, orig, recon, error
            );
        }
    }
}

// Property 2: Shape is preserved in both directions, for any dimensionality
proptest! {
    #[test]
    fn prop_shape_preserved(
        dims in prop::collection::vec(1usize..5, 1..4),
        target in target_strategy()
    ) {
        let n: usize = dims.iter().product();
        let x = Array::from_shape_vec(IxDyn(&dims), (0..n).map(|i| i as f64 - n as f64 / 2.0).collect()).unwrap();
        let fitted = QuantizerConfig::new(target).with_max_value(n as f64).fit(&x).unwrap();

        let q = fitted.transform(&x);
        prop_assert_eq!(q.shape(), x.shape());
        let back = fitted.inverse_transform_quantized(&q);
        prop_assert_eq!(back.shape(), x.shape());
    }
}

// Property 3: Output element type is exactly the configured target type
proptest! {
    #[test]
    fn prop_element_type_matches_config(
        x in matrix_strategy(-5.0..5.0),
        target in target_strategy()
    ) {
        let fitted = QuantizerConfig::new(target).fit(&x);
        // constant-zero draws have no usable bound
        prop_assume!(fitted.is_ok());
        let q = fitted.unwrap().transform(&x);

        prop_assert_eq!(q.target_type(), target);
        let typed = match target {
            TargetType::Int8 => q.as_array::<i8>().is_some(),
            TargetType::Int16 => q.as_array::<i16>().is_some(),
            TargetType::Int32 => q.as_array::<i32>().is_some(),
            TargetType::Float16 => q.as_array::<f16>().is_some(),
            TargetType::Float32 => q.as_array::<f32>().is_some(),
        };
        prop_assert!(typed);
    }
}

// Property 4: Values at the band edge are not clipped, values beyond clamp to it
proptest! {
    #[test]
    fn prop_clipping_boundary(
        excess in 0.0f64..1e6,
        clip in prop::sample::select(vec![ClipRange::Bound, ClipRange::TargetRange])
    ) {
        // scale 0.5 for int16, exact in binary
        let fitted = QuantizerConfig::new(TargetType::Int16)
            .with_max_value(65534.0)
            .with_clip(clip)
            .fit(&ndarray::array![0.0])
            .unwrap();
        let band = fitted.clip_band();

        let at_edge: Array2<i16> = fitted.transform_as(&ndarray::array![[band, -band]]).unwrap();
        let beyond: Array2<i16> = fitted
            .transform_as(&ndarray::array![[band + excess, -band - excess]])
            .unwrap();

        prop_assert_eq!(&at_edge, &beyond);
        prop_assert_eq!(at_edge[[0, 0]] as f64, (band * 0.5).trunc().min(32767.0));
    }
}

// Property 5: An explicit bound ignores the data
proptest! {
    #[test]
    fn prop_explicit_bound_ignores_data(
        a in matrix_strategy(-100.0..100.0),
        b in matrix_strategy(-1.0..1.0),
        target in target_strategy()
    ) {
        let config = QuantizerConfig::new(target).with_max_value(10.0);
        let fa = config.fit(&a).unwrap();
        let fb = config.fit(&b).unwrap();
        prop_assert_eq!(fa.scale(), fb.scale());
        prop_assert_eq!(fa.scale(), target.max_magnitude() / 10.0);
    }
}

// Property 6: Re-fitting reflects only the latest data
proptest! {
    #[test]
    fn prop_refit_does_not_accumulate(
        a in matrix_strategy(-100.0..100.0),
        b in matrix_strategy(-1.0..1.0)
    ) {
        let mut stage = featquant_core::Quantizer::new(QuantizerConfig::default());
        let fresh_b = QuantizerConfig::default().fit(&b);
        prop_assume!(fresh_b.is_ok() && QuantizerConfig::default().fit(&a).is_ok());

        stage.fit(&a).unwrap();
        stage.fit(&b).unwrap();
        prop_assert_eq!(stage.scale(), Some(fresh_b.unwrap().scale()));
    }
}
