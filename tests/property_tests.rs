use dynbuf::{DynError, DynamicBuffer, DynamicMatrix, MatVecRule};
use proptest::prelude::*;

fn arb_values(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000i64..1_000, 1..max_len)
}

fn arb_pair(max_len: usize) -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    (1..max_len).prop_flat_map(|len| {
        (
            prop::collection::vec(-1_000i64..1_000, len),
            prop::collection::vec(-1_000i64..1_000, len),
        )
    })
}

fn arb_matrix(max_size: usize) -> impl Strategy<Value = Vec<Vec<i64>>> {
    (1..max_size).prop_flat_map(|size| {
        prop::collection::vec(prop::collection::vec(-100i64..100, size), size)
    })
}

proptest! {
    #[test]
    fn construct_reports_length(len in 1usize..2_000) {
        let v = DynamicBuffer::<u8>::new(len).unwrap();
        prop_assert_eq!(v.len(), len);
    }

    #[test]
    fn clone_is_equal_and_independent(values in arb_values(64)) {
        let v = DynamicBuffer::try_from(values.clone()).unwrap();
        let mut copy = v.clone();
        prop_assert_eq!(&copy, &v);

        copy[0] += 1;
        prop_assert_eq!(v.as_slice(), &values[..]);
        prop_assert_ne!(&copy, &v);
    }

    #[test]
    fn equality_is_symmetric(a in arb_values(16), b in arb_values(16)) {
        let va = DynamicBuffer::try_from(a.clone()).unwrap();
        let vb = DynamicBuffer::try_from(b.clone()).unwrap();
        prop_assert_eq!(va == vb, vb == va);
        prop_assert_eq!(va == vb, a == b);
        if a.len() != b.len() {
            prop_assert_ne!(va, vb);
        }
    }

    #[test]
    fn scalar_ops_are_elementwise(values in arb_values(64), s in -1_000i64..1_000) {
        let v = DynamicBuffer::try_from(values).unwrap();
        let sum = v.add_scalar(s);
        let diff = v.sub_scalar(s);
        let product = v.mul_scalar(s);
        for i in 0..v.len() {
            prop_assert_eq!(sum[i], v[i] + s);
            prop_assert_eq!(diff[i], v[i] - s);
            prop_assert_eq!(product[i], v[i] * s);
        }
        prop_assert_eq!(&v + s, sum);
        prop_assert_eq!(&v - s, diff);
        prop_assert_eq!(&v * s, product);
    }

    #[test]
    fn vector_ops_are_elementwise((a, b) in arb_pair(64)) {
        let va = DynamicBuffer::try_from(a).unwrap();
        let vb = DynamicBuffer::try_from(b).unwrap();
        let sum = &va + &vb;
        let diff = &va - &vb;
        for i in 0..va.len() {
            prop_assert_eq!(sum[i], va[i] + vb[i]);
            prop_assert_eq!(diff[i], va[i] - vb[i]);
        }
    }

    #[test]
    fn dot_is_sum_of_products((a, b) in arb_pair(64)) {
        let expected: i64 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        let va = DynamicBuffer::try_from(a).unwrap();
        let vb = DynamicBuffer::try_from(b).unwrap();
        prop_assert_eq!(&va * &vb, expected);
    }

    #[test]
    fn mismatched_lengths_are_rejected(a in arb_values(16), b in arb_values(16)) {
        prop_assume!(a.len() != b.len());
        let va = DynamicBuffer::try_from(a).unwrap();
        let vb = DynamicBuffer::try_from(b).unwrap();
        let expected = DynError::SizeMismatch { left: va.len(), right: vb.len() };
        prop_assert_eq!(va.try_add(&vb).unwrap_err(), expected.clone());
        prop_assert_eq!(va.try_sub(&vb).unwrap_err(), expected.clone());
        prop_assert_eq!(va.try_dot(&vb).unwrap_err(), expected);
    }

    #[test]
    fn negation_cancels(values in arb_values(64)) {
        let v = DynamicBuffer::try_from(values).unwrap();
        prop_assert_eq!(-(-&v), v.clone());
        prop_assert!((&v + &(-&v)).iter().all(|&x| x == 0));
    }

    #[test]
    fn matrix_scalar_scales_every_entry(rows in arb_matrix(8), s in -100i64..100) {
        let m = DynamicMatrix::try_from(rows).unwrap();
        let scaled = m.mul_scalar(s);
        for (x, y) in m.elements().zip(scaled.elements()) {
            prop_assert_eq!(*y, x * s);
        }
    }

    #[test]
    fn matrix_vector_standard_rule(rows in arb_matrix(8)) {
        let size = rows.len();
        let m = DynamicMatrix::try_from(rows.clone()).unwrap();
        let v = DynamicBuffer::from_fn(size, |i| i as i64 - 2).unwrap();
        let result = m.try_mul_vector_with(&v, MatVecRule::Standard).unwrap();
        for (r, row) in rows.iter().enumerate() {
            let expected: i64 = row.iter().enumerate().map(|(c, x)| x * v[c]).sum();
            prop_assert_eq!(result[r], expected);
        }
    }

    #[test]
    fn matmul_with_identity(rows in arb_matrix(8)) {
        let m = DynamicMatrix::try_from(rows).unwrap();
        let id = DynamicMatrix::from_fn(m.size(), |r, c| i64::from(r == c)).unwrap();
        prop_assert_eq!(m.try_matmul(&id).unwrap(), m.clone());
        prop_assert_eq!(id.try_matmul(&m).unwrap(), m);
    }

    #[test]
    fn text_round_trip_integers(values in arb_values(64)) {
        let v = DynamicBuffer::try_from(values).unwrap();
        let mut back = DynamicBuffer::<i64>::new(v.len()).unwrap();
        back.read_from(&mut v.to_string().as_bytes()).unwrap();
        prop_assert_eq!(back, v);
    }

    #[test]
    fn text_round_trip_floats(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..32)) {
        let v = DynamicBuffer::try_from(values).unwrap();
        let back: DynamicBuffer<f64> = v.to_string().parse().unwrap();
        prop_assert_eq!(back, v);
    }

    #[test]
    fn matrix_text_round_trip(rows in arb_matrix(8)) {
        let m = DynamicMatrix::try_from(rows).unwrap();
        let mut back = DynamicMatrix::<i64>::new(m.size()).unwrap();
        back.read_from(&mut m.to_string().as_bytes()).unwrap();
        prop_assert_eq!(back, m);
    }
}
