use approx::assert_relative_eq;

use hypergraph_variety::isomorphism::candidate_rules;
use hypergraph_variety::{
    Hypergraph, Indifference, Rule, SearchConfig, find_isomorphism, is_isomorphic, variety,
    variety_diagnostics,
};

fn parse(s: &str) -> Hypergraph {
    s.parse().expect("valid hypergraph")
}

fn samples() -> Vec<Hypergraph> {
    [
        "{}",
        "{{}}",
        "{{1}}",
        "{{1,2}}",
        "{{1,2},{2,3}}",
        "{{1,2},{3,4}}",
        "{{1,1,2},{2,3}}",
        "{{1,2},{2,3,5},{3,4}}",
        "{{1,2,3},{3,4,5},{5,6,1}}",
        "{{1,2},{1,2},{2,3},{3,1}}",
    ]
    .into_iter()
    .map(parse)
    .collect()
}

#[test]
fn test_reflexive() {
    for hg in samples() {
        assert!(is_isomorphic(&hg, &hg), "{hg} should be isomorphic to itself");
    }
}

#[test]
fn test_symmetric() {
    let samples = samples();
    for f in &samples {
        for g in &samples {
            assert_eq!(is_isomorphic(f, g), is_isomorphic(g, f), "{f} vs {g}");
        }
    }
}

#[test]
fn test_relabelling_invariance() {
    for hg in samples() {
        let vertices = hg.unique_vertices();
        // shift every label and reverse their order
        let image: Vec<usize> = vertices.iter().rev().map(|v| v + 100).collect();
        let rule = Rule::new(&vertices, &image).unwrap();
        let relabelled = hg.apply_rule(&rule).unwrap();
        assert!(is_isomorphic(&hg, &relabelled), "{hg} vs {relabelled}");
    }
}

#[test]
fn test_witness_maps_onto_target() {
    let f = parse("{{1,2,3},{3,4,5},{5,6,1}}");
    let g = parse("{{4,5,6},{6,1,2},{2,3,4}}");
    let rule = find_isomorphism(&f, &g, &SearchConfig::default())
        .unwrap()
        .expect("triangles of 3-edges are isomorphic");

    let mut mapped: Vec<String> = f
        .apply_rule(&rule)
        .unwrap()
        .iter()
        .map(|he| he.to_string())
        .collect();
    let mut target: Vec<String> = g.iter().map(|he| he.to_string()).collect();
    mapped.sort();
    target.sort();
    assert_eq!(mapped, target);
}

#[test]
fn test_frequency_shape_rejects_without_candidates() {
    let f = parse("{{1,1,1},{2,3,4}}");
    let g = parse("{{1,2,3},{2,3,4}}");
    assert!(!f.frequency_of_vertices().is_of_same_shape(&g.frequency_of_vertices()));

    // a limit of zero candidates would trip if the search got as far as enumerating
    let limited = SearchConfig::with_max_candidates(0);
    assert_eq!(find_isomorphism(&f, &g, &limited).unwrap(), None);
}

#[test]
fn test_every_candidate_is_frequency_preserving() {
    let f = parse("{{1,2},{2,3},{3,4}}");
    let g = parse("{{5,6},{6,7},{7,8}}");
    let f_freq = f.frequency_of_vertices();
    let g_freq = g.frequency_of_vertices();

    for rule in candidate_rules(&f_freq, &g_freq).unwrap() {
        for (u, v) in rule.iter() {
            assert_eq!(f.frequency_of(u), g.frequency_of(v));
        }
    }
}

#[test]
fn test_scenario_single_edge() {
    let hg = parse("{{1,2}}");
    let ind = Indifference::new(&hg);
    assert_eq!(ind.relative(1, 2).unwrap(), 0);
    assert_eq!(variety(&hg).unwrap(), 0.0);
}

#[test]
fn test_scenario_path() {
    let path = parse("{{1,2},{2,3}}");
    assert!(is_isomorphic(&path, &parse("{{3,2},{2,1}}")));

    let ind = Indifference::new(&path);
    assert!(ind.absolute(2).unwrap() > ind.absolute(1).unwrap());
}

#[test]
fn test_scenario_disjoint_vs_path() {
    assert!(!is_isomorphic(&parse("{{1,2},{3,4}}"), &parse("{{1,2},{2,3}}")));
}

#[test]
fn test_scenario_empty() {
    let empty = Hypergraph::default();
    assert!(is_isomorphic(&empty, &empty));
    assert_eq!(variety(&empty).unwrap(), 0.0);
}

#[test]
fn test_scenario_shape_mismatch() {
    assert!(matches!(
        Rule::new(&[1, 2], &[3, 4, 5]),
        Err(hypergraph_variety::Error::ShapeMismatch { .. })
    ));
}

#[test]
fn test_degenerate_variety_is_zero() {
    for hg in samples() {
        let diagnostics = variety_diagnostics(&hg).unwrap();
        if diagnostics.iter().any(|&(_, ai)| ai == 0) {
            assert_eq!(variety(&hg).unwrap(), 0.0, "{hg}");
        }
    }
}

#[test]
fn test_variety_matches_diagnostics() {
    let hg = parse("{{1,1,2},{2,3}}");
    let diagnostics = variety_diagnostics(&hg).unwrap();
    let expected: f64 = diagnostics.iter().map(|&(_, ai)| 1.0 / ai as f64).sum();
    assert_relative_eq!(variety(&hg).unwrap(), expected);
    assert_relative_eq!(expected, 3.0);
}
