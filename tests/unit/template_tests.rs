/*!
 * Tests for marker scanning and substitution
 */

use anyhow::Result;
use texsub::glossary::Glossary;
use texsub::key_registry::KeyRegistry;
use texsub::template::Substitutor;

use crate::common;

fn pair(source: &str, canonical: &str) -> (Option<String>, Option<String>) {
    (Some(source.to_string()), Some(canonical.to_string()))
}

fn sample_registry() -> Result<KeyRegistry> {
    Ok(KeyRegistry::from_json(common::sample_data_json())?)
}

/// Test the canonical substitution example: one marker, one matching path
#[test]
fn test_apply_withResolvableMarker_shouldInsertPathReference() -> Result<()> {
    let glossary = Glossary::from_pairs(vec![pair("城市", "city")]);
    let registry = sample_registry()?;
    let substitutor = Substitutor::new(&glossary, &registry);

    let (output, report) = substitutor.apply("{{城市}}");

    assert_eq!(output, "[(${profile.address.city})] ");
    assert_eq!(report.replaced, 1);
    assert!(report.is_clean());
    Ok(())
}

/// Test that a repeated marker is replaced identically everywhere
#[test]
fn test_apply_withRepeatedMarker_shouldReplaceAllOccurrences() -> Result<()> {
    let glossary = Glossary::from_pairs(vec![pair("城市", "city")]);
    let registry = sample_registry()?;
    let substitutor = Substitutor::new(&glossary, &registry);

    let (output, _) = substitutor.apply("first {{城市}} then\nagain {{城市}} end");

    assert_eq!(
        output,
        "first [(${profile.address.city})]  then\nagain [(${profile.address.city})]  end"
    );
    assert!(!output.contains("{{城市}}"));
    Ok(())
}

/// Test that a keyword absent from the glossary leaves the marker verbatim
#[test]
fn test_apply_withGlossaryGap_shouldLeaveMarkerUntouched() -> Result<()> {
    let glossary = Glossary::from_pairs(vec![pair("城市", "city")]);
    let registry = sample_registry()?;
    let substitutor = Substitutor::new(&glossary, &registry);

    let input = "known {{城市}} unknown {{街道}}";
    let (output, report) = substitutor.apply(input);

    assert!(output.contains("{{街道}}"));
    assert_eq!(report.replaced, 1);
    assert_eq!(report.glossary_gaps, 1);
    assert_eq!(report.registry_gaps, 0);
    Ok(())
}

/// Test that a canonical keyword with no matching path leaves the marker verbatim
#[test]
fn test_apply_withRegistryGap_shouldLeaveMarkerUntouched() -> Result<()> {
    let glossary = Glossary::from_pairs(vec![pair("国家", "country")]);
    let registry = sample_registry()?;
    let substitutor = Substitutor::new(&glossary, &registry);

    let input = "value: {{国家}}";
    let (output, report) = substitutor.apply(input);

    assert_eq!(output, input);
    assert_eq!(report.replaced, 0);
    assert_eq!(report.registry_gaps, 1);
    Ok(())
}

/// Test that a marker failing to resolve stays verbatim at every occurrence
#[test]
fn test_apply_withRepeatedUnresolvedMarker_shouldLeaveBothVerbatim() -> Result<()> {
    let glossary = Glossary::from_pairs(vec![]);
    let registry = sample_registry()?;
    let substitutor = Substitutor::new(&glossary, &registry);

    let input = "{{街道}} and {{街道}}";
    let (output, report) = substitutor.apply(input);

    assert_eq!(output, input);
    assert_eq!(report.glossary_gaps, 2);
    Ok(())
}

/// Test that re-running substitution on substituted output is a no-op
#[test]
fn test_apply_withAlreadySubstitutedText_shouldBeNoOp() -> Result<()> {
    let glossary = Glossary::from_pairs(vec![pair("城市", "city")]);
    let registry = sample_registry()?;
    let substitutor = Substitutor::new(&glossary, &registry);

    let (first_pass, _) = substitutor.apply("city: {{城市}}");
    let (second_pass, report) = substitutor.apply(&first_pass);

    assert_eq!(second_pass, first_pass);
    assert_eq!(report.replaced, 0);
    assert!(report.is_clean());
    Ok(())
}

/// Test that the literal {{None}} marker is treated as a glossary gap
#[test]
fn test_apply_withSentinelMarker_shouldCountGlossaryGap() -> Result<()> {
    let glossary = Glossary::from_pairs(vec![pair("None", "name")]);
    let registry = sample_registry()?;
    let substitutor = Substitutor::new(&glossary, &registry);

    let input = "{{None}}";
    let (output, report) = substitutor.apply(input);

    assert_eq!(output, input);
    assert_eq!(report.glossary_gaps, 1);
    Ok(())
}

/// Test that an empty marker is scanned and resolved like any keyword
#[test]
fn test_apply_withEmptyMarker_shouldResolveEmptyKeyword() -> Result<()> {
    let glossary = Glossary::from_pairs(vec![pair("城市", "city")]);
    let registry = sample_registry()?;
    let substitutor = Substitutor::new(&glossary, &registry);

    let input = "before {{}} after";
    let (output, report) = substitutor.apply(input);

    // The empty keyword has no glossary entry, so the marker stays
    assert_eq!(output, input);
    assert_eq!(report.glossary_gaps, 1);
    Ok(())
}

/// Test that diagnostics and replacements coexist in one pass
#[test]
fn test_apply_withMixedMarkers_shouldReportEachCategory() -> Result<()> {
    let glossary = Glossary::from_pairs(vec![pair("城市", "city"), pair("国家", "country")]);
    let registry = sample_registry()?;
    let substitutor = Substitutor::new(&glossary, &registry);

    let input = "{{城市}} {{国家}} {{未知}}";
    let (output, report) = substitutor.apply(input);

    assert!(output.contains("[(${profile.address.city})] "));
    assert!(output.contains("{{国家}}"));
    assert!(output.contains("{{未知}}"));
    assert_eq!(report.replaced, 1);
    assert_eq!(report.registry_gaps, 1);
    assert_eq!(report.glossary_gaps, 1);
    Ok(())
}
