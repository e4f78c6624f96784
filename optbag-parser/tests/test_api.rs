use optbag_parser::{parse, Error, ErrorKind, Opt, OptName, ParsedOptions, DEFAULT_OPT_LIMIT};

#[test]
fn test_opt_short() {
    let opt = Opt::short('a');
    assert!(opt.is_short('a'));
    assert!(!opt.is_short('x'));
    assert!(!opt.is_long("blah"));
    assert!(opt.is_either('a', "blah"));
    assert_eq!(opt.name(), &OptName::Short('a'));
    assert_eq!(opt.value(), None);
}

#[test]
fn test_opt_long() {
    let opt = Opt::long("test").with_value("42");
    assert!(!opt.is_short('a'));
    assert!(opt.is_long("test"));
    assert!(!opt.is_long("other"));
    assert!(opt.is_either('t', "test"));
    assert_eq!(opt.name(), &OptName::Long("test".to_string()));
    assert_eq!(opt.value(), Some("42"));
}

#[test]
fn test_parsed_options_push_enforces_limit() {
    let mut opts = ParsedOptions::with_limit(1);
    assert_eq!(opts.limit(), 1);
    opts.push(Opt::short('a')).unwrap();
    let err = opts.push(Opt::short('b')).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert_eq!(err.limit(), Some(1));
    assert_eq!(opts.len(), 1);
}

#[test]
fn test_parsed_options_default() {
    let opts = ParsedOptions::default();
    assert_eq!(opts.limit(), DEFAULT_OPT_LIMIT);
    assert!(opts.is_empty());
    assert_eq!(opts.len(), 0);
    assert_eq!(opts.get(0), None);
}

#[test]
fn test_lookup_distinguishes_missing_from_valueless() -> Result<(), Error> {
    let parsed = parse(["prog", "--verbose"].into_iter())?;

    // present without a value
    let opt = parsed.find_long("verbose").unwrap();
    assert_eq!(opt.value(), None);

    // absent entirely
    assert!(parsed.find_long("quiet").is_none());
    assert!(parsed.find_short('q').is_none());
    Ok(())
}

#[test]
fn test_iteration() -> Result<(), Error> {
    let parsed = parse(["prog", "-a", "--b=2", "-c3"].into_iter())?;

    let names: Vec<&OptName> = parsed.iter().map(|opt| opt.name()).collect();
    assert_eq!(
        names,
        vec![
            &OptName::Short('a'),
            &OptName::Long("b".to_string()),
            &OptName::Short('c'),
        ]
    );

    let values: Vec<Option<&str>> = (&parsed).into_iter().map(|opt| opt.value()).collect();
    assert_eq!(values, vec![None, Some("2"), Some("3")]);
    Ok(())
}
