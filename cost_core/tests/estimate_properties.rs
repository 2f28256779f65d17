//! Properties that must hold for every valid project input.

use cost_core::estimate::tables::LINE_ITEM_TABLE;
use cost_core::estimate::{
    aggregate, estimate, generate_cost_breakdown, generate_optimizations, summarize, CostCategory, CostLineItem,
};
use cost_core::project::{Exterior, Foundation, ProjectInput, ProjectType, Roofing, Structure};
use cost_core::store::ProjectStore;
use cost_core::units::round_half_up;
use proptest::prelude::*;

fn project_input() -> impl Strategy<Value = ProjectInput> {
    (
        1.0f64..500.0,
        1.0f64..500.0,
        1.0f64..120.0,
        5.0f64..250.0,
        100.0f64..200_000.0,
        prop::sample::select(ProjectType::ALL.to_vec()),
        prop::sample::select(Foundation::ALL.to_vec()),
        prop::sample::select(Structure::ALL.to_vec()),
        prop::sample::select(Exterior::ALL.to_vec()),
        prop::sample::select(Roofing::ALL.to_vec()),
    )
        .prop_map(
            |(length, width, height, labor_rate, labor_hours, project_type, foundation, structure, exterior, roofing)| {
                ProjectInput {
                    name: "Generated Project".to_string(),
                    project_type,
                    length,
                    width,
                    height,
                    foundation,
                    structure,
                    exterior,
                    roofing,
                    labor_rate,
                    labor_hours,
                    additional_requirements: None,
                }
            },
        )
}

fn line_item() -> impl Strategy<Value = CostLineItem> {
    (
        prop::sample::select(CostCategory::ALL.to_vec()),
        0.0f64..10_000.0,
        0.0f64..5_000.0,
    )
        .prop_map(|(category, quantity, unit_cost)| {
            let quantity = round_half_up(quantity);
            CostLineItem {
                category,
                item: "Item".to_string(),
                quantity,
                unit: "ea".to_string(),
                unit_cost,
                total: round_half_up(quantity * unit_cost),
            }
        })
}

proptest! {
    #[test]
    fn estimate_is_deterministic(input in project_input()) {
        let a = estimate(&input).unwrap();
        let b = estimate(&input).unwrap();
        prop_assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn aggregate_total_is_sum_of_buckets(items in prop::collection::vec(line_item(), 0..20)) {
        let costs = aggregate(&items);
        prop_assert_eq!(
            costs.total_cost,
            costs.materials_cost + costs.labor_cost + costs.equipment_cost + costs.overhead_cost
        );
    }

    #[test]
    fn overhead_is_twelve_percent_rounded(items in prop::collection::vec(line_item(), 0..20)) {
        let costs = aggregate(&items);
        prop_assert_eq!(
            costs.overhead_cost,
            round_half_up(0.12 * (costs.materials_cost + costs.labor_cost + costs.equipment_cost))
        );
    }

    #[test]
    fn labor_shares_cover_all_hours(input in project_input()) {
        let raw: f64 = LINE_ITEM_TABLE
            .iter()
            .filter(|row| row.category == CostCategory::Labor)
            .map(|row| row.raw_quantity(&input))
            .sum();
        prop_assert!((raw - input.labor_hours).abs() <= input.labor_hours * 1e-12);
    }

    #[test]
    fn valid_input_is_non_negative(input in project_input()) {
        let project = estimate(&input).unwrap();
        for item in &project.cost_breakdown_items {
            prop_assert!(item.quantity >= 0.0);
            prop_assert!(item.total >= 0.0);
        }
        for suggestion in &project.optimization_suggestions {
            prop_assert!(suggestion.savings >= 0.0);
        }
    }

    #[test]
    fn optimized_cost_never_exceeds_total(input in project_input()) {
        let project = estimate(&input).unwrap();
        prop_assert!(project.summary.potential_savings >= 0.0);
        prop_assert!(project.summary.optimized_cost <= project.costs.total_cost);
    }

    #[test]
    fn every_call_path_agrees_on_aggregate(input in project_input()) {
        let direct = aggregate(&generate_cost_breakdown(&input));
        let composed = estimate(&input).unwrap();

        let mut store = ProjectStore::default();
        let id = store.create_project(input.clone()).unwrap().id;
        let stored = store.get_project(&id).unwrap().calculations.costs;
        let reported = store.report(&id).unwrap().costs;

        prop_assert_eq!(direct, composed.costs);
        prop_assert_eq!(direct, stored);
        prop_assert_eq!(direct, reported);
    }

    #[test]
    fn stagewise_pipeline_matches_estimate(input in project_input()) {
        let items = generate_cost_breakdown(&input);
        let costs = aggregate(&items);
        let suggestions = generate_optimizations(&input, costs.total_cost);
        let summary = summarize(&suggestions, costs.total_cost).unwrap();

        let project = estimate(&input).unwrap();
        prop_assert_eq!(project.cost_breakdown_items, items);
        prop_assert_eq!(project.optimization_suggestions, suggestions);
        prop_assert_eq!(project.summary, summary);
    }
}

#[test]
fn example_scenario_is_pinned() {
    let input = ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0);
    let project = estimate(&input).unwrap();

    let totals: Vec<f64> = project.cost_breakdown_items.iter().map(|i| i.total).collect();
    assert_eq!(
        totals,
        [216_000.0, 127_600.0, 61_440.0, 95_040.0, 37_800.0, 88_200.0, 126_000.0, 84_000.0, 9_600.0]
    );
    assert_eq!(project.costs.materials_cost, 500_080.0);
    assert_eq!(project.costs.labor_cost, 252_000.0);
    assert_eq!(project.costs.equipment_cost, 93_600.0);
    assert_eq!(project.costs.overhead_cost, 101_482.0);
    assert_eq!(project.costs.total_cost, 947_162.0);
    assert_eq!(project.summary.potential_savings, 55_910.0);
    assert_eq!(project.summary.optimized_cost, 891_252.0);
}

#[test]
fn example_labor_shares_are_exact() {
    let input = ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0);
    let raw: f64 = LINE_ITEM_TABLE
        .iter()
        .filter(|row| row.category == CostCategory::Labor)
        .map(|row| row.raw_quantity(&input))
        .sum();
    assert_eq!(raw, 5600.0);
}
