//! Property-based tests for the three calculation stages.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use zakat_engine::prelude::*;

/// Non-negative currency amounts up to ten billion, with 0 to 2 decimals.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000, 0u32..=2).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Positive per-gram prices.
fn price() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000, 0u32..=2).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn assets() -> impl Strategy<Value = AssetBundle> {
    prop::array::uniform8(amount()).prop_map(|v| {
        AssetBundle::new()
            .cash(v[0])
            .bank_balance(v[1])
            .gold_value(v[2])
            .silver_value(v[3])
            .business_inventory(v[4])
            .investments(v[5])
            .investment_properties(v[6])
            .other(v[7])
    })
}

fn liabilities() -> impl Strategy<Value = LiabilityBundle> {
    prop::array::uniform3(amount())
        .prop_map(|v| LiabilityBundle::new().necessary_loans(v[0]).unpaid_bills(v[1]).other(v[2]))
}

fn bump(bundle: &AssetBundle, field: usize, delta: Decimal) -> AssetBundle {
    let mut b = bundle.clone();
    match field {
        0 => b.cash += delta,
        1 => b.bank_balance += delta,
        2 => b.gold_value += delta,
        3 => b.silver_value += delta,
        4 => b.business_inventory_value += delta,
        5 => b.investments_value += delta,
        6 => b.investment_properties_value += delta,
        _ => b.other += delta,
    }
    b
}

proptest! {
    #[test]
    fn normalize_stays_within_half_a_unit(gold in price(), silver in price()) {
        let derived = normalize(gold, silver);

        prop_assert!((derived.gold_per_traditional_unit - gold * dec!(11.66)).abs() <= dec!(0.5));
        prop_assert!((derived.silver_per_traditional_unit - silver * dec!(11.66)).abs() <= dec!(0.5));
        prop_assert_eq!(derived.gold_per_traditional_unit.fract(), Decimal::ZERO);

        prop_assert!((derived.silver_selling_per_gram - silver * dec!(0.8)).abs() <= dec!(0.005));
        prop_assert!(derived.silver_selling_per_gram.scale() <= 2);
        prop_assert!(derived.gold_selling_per_gram <= gold);
    }

    #[test]
    fn stages_are_idempotent(gold in price(), silver in price(), a in assets(), l in liabilities(), nisab in amount()) {
        prop_assert_eq!(normalize(gold, silver), normalize(gold, silver));

        let derived = normalize(gold, silver);
        prop_assert_eq!(resolve_nisab(&derived), resolve_nisab(&derived));

        prop_assert_eq!(assess(&a, &l, nisab), assess(&a, &l, nisab));
    }

    #[test]
    fn silver_nisab_is_always_recommended(gold in price(), silver in price()) {
        let nisab = resolve_nisab(&normalize(gold, silver));
        prop_assert_eq!(nisab.recommended, nisab.silver_nisab);
        prop_assert_eq!(nisab.basis, NisabBasis::Silver);
    }

    #[test]
    fn obligation_and_due_follow_the_rule(a in assets(), l in liabilities(), nisab in amount()) {
        let r = assess(&a, &l, nisab);

        prop_assert_eq!(r.zakatable_amount, r.total_assets - r.deductible_liabilities);
        prop_assert_eq!(r.is_obligatory, r.zakatable_amount >= nisab && r.zakatable_amount >= Decimal::ZERO);
        if r.is_obligatory {
            prop_assert!((r.zakat_due - r.zakatable_amount * ZAKAT_RATE).abs() <= dec!(0.5));
        } else {
            prop_assert_eq!(r.zakat_due, Decimal::ZERO);
        }
    }

    #[test]
    fn more_assets_never_mean_less_zakat(
        a in assets(),
        l in liabilities(),
        nisab in amount(),
        field in 0usize..8,
        delta in amount(),
    ) {
        let before = assess(&a, &l, nisab);
        let after = assess(&bump(&a, field, delta), &l, nisab);

        prop_assert!(after.zakatable_amount >= before.zakatable_amount);
        prop_assert!(after.zakat_due >= before.zakat_due);
        prop_assert!(after.is_obligatory || !before.is_obligatory);
    }

    #[test]
    fn wealth_at_nisab_is_obligatory(silver in price()) {
        let nisab = resolve_nisab(&normalize(dec!(11761), silver)).recommended;
        let r = assess(&AssetBundle::new().cash(nisab), &LiabilityBundle::new(), nisab);
        prop_assert!(r.is_obligatory);
    }

    #[test]
    fn calculate_accepts_every_in_range_request(gold in price(), silver in price(), a in assets(), l in liabilities()) {
        let request = ZakatRequest::new(MetalPrices::new(gold, silver).unwrap(), a, l);
        let response = calculate(&request).unwrap();
        prop_assert_eq!(response.assessment.nisab_threshold, response.nisab.silver_nisab);
    }
}
