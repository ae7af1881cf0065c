//! Integration tests for end-to-end tokenizer behavior.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use uniword::analysis::transliterator::RuleSetTransliterator;
use uniword::prelude::*;

fn root_tokenizer() -> Result<SegmentingTokenizer> {
    SegmentingTokenizer::create(&TokenizerConfig::default(), &BuiltinCapabilities)
}

fn collect(tokenizer: &mut SegmentingTokenizer, text: &[u8]) -> Result<(Vec<Token>, TokenizeStats)> {
    let mut collector = TokenCollector::new();
    let stats = tokenizer.tokenize(TokenizeFlags::DOCUMENT, text, None, &mut collector)?;
    Ok((collector.into_tokens(), stats))
}

#[test]
fn test_single_ascii_word() -> Result<()> {
    let mut tokenizer = root_tokenizer()?;
    let (tokens, stats) = collect(&mut tokenizer, b"Hello")?;

    assert_eq!(tokens, vec![Token::with_offsets("hello", 0, 0, 5)]);
    assert_eq!(stats.tokens, 1);
    assert_eq!(stats.code_units, 5);
    Ok(())
}

#[test]
fn test_inputs_without_words() -> Result<()> {
    let mut tokenizer = root_tokenizer()?;
    for input in ["", " ", "...", " \t,;!? \n", "「」。、"] {
        let (tokens, stats) = collect(&mut tokenizer, input.as_bytes())?;
        assert!(tokens.is_empty(), "unexpected tokens for {input:?}: {tokens:?}");
        assert_eq!(stats.tokens, 0);
    }
    Ok(())
}

#[test]
fn test_supplementary_plane_offsets() -> Result<()> {
    let input = "x \u{1D400}bc";
    let mut tokenizer = root_tokenizer()?;
    let (tokens, _) = collect(&mut tokenizer, input.as_bytes())?;

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], Token::with_offsets("x", 0, 0, 1));
    // The token starts at the first byte of the 4-byte scalar.
    assert_eq!(tokens[1], Token::with_offsets("abc", 1, 2, 8));
    assert_eq!(tokens[1].source(input.as_bytes()), Some("\u{1D400}bc".as_bytes()));
    Ok(())
}

#[test]
fn test_offsets_point_into_original_input() -> Result<()> {
    let input = "Ｈｅｌｌｏ, Wörld! Привет ガギグ";
    let mut tokenizer = root_tokenizer()?;
    let (tokens, _) = collect(&mut tokenizer, input.as_bytes())?;

    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["hello", "world", "privet", "がぎぐ"]);

    let sources: Vec<&str> = tokens
        .iter()
        .map(|t| &input[t.start_offset..t.end_offset])
        .collect();
    assert_eq!(sources, vec!["Ｈｅｌｌｏ", "Wörld", "Привет", "ガギグ"]);
    Ok(())
}

#[test]
fn test_transform_is_idempotent() -> Result<()> {
    let input = "Ｈｅｌｌｏ Wörld Привет ガギグ Ωμέγα ﬁne";
    let mut tokenizer = root_tokenizer()?;
    let transliterator = RuleSetTransliterator::new(tokenizer.rules())?;
    let (tokens, _) = collect(&mut tokenizer, input.as_bytes())?;

    assert_eq!(tokens.len(), 6);
    for token in &tokens {
        assert_eq!(transliterator.apply(&token.text), token.text);
    }
    Ok(())
}

#[test]
fn test_scratch_growth_threshold() -> Result<()> {
    // 100 units need 6 * 100 + 2048 = 2648 scratch units.
    let input = "a".repeat(100);
    let output_bytes = 8 * 100 + 4096;

    let exact = TokenizerConfig::default()
        .with_initial_scratch_units(2648)
        .with_initial_output_bytes(output_bytes);
    let mut tokenizer = SegmentingTokenizer::create(&exact, &BuiltinCapabilities)?;
    let (tokens, stats) = collect(&mut tokenizer, input.as_bytes())?;
    assert_eq!(tokens[0].text, input);
    assert_eq!(stats.scratch_growths, 0);
    assert_eq!(stats.output_growths, 0);

    let short = exact.clone().with_initial_scratch_units(2647);
    let mut tokenizer = SegmentingTokenizer::create(&short, &BuiltinCapabilities)?;
    let (tokens, stats) = collect(&mut tokenizer, input.as_bytes())?;
    assert_eq!(tokens, vec![Token::with_offsets(input.clone(), 0, 0, 100)]);
    assert_eq!(stats.scratch_growths, 1);
    Ok(())
}

#[test]
fn test_expanding_transform_with_small_buffers() -> Result<()> {
    // U+FDFA decomposes to 18 characters under NFKD.
    let input = "\u{FDFA}".repeat(50);
    let config = TokenizerConfig::new("arabic")
        .with_rules("NFKD")
        .with_initial_scratch_units(1)
        .with_initial_output_bytes(1);
    let mut tokenizer = SegmentingTokenizer::create(&config, &BuiltinCapabilities)?;
    let (tokens, stats) = collect(&mut tokenizer, input.as_bytes())?;

    let expected: String = input.nfkd().filter(|c| *c != ' ').collect();
    let joined: String = tokens.iter().flat_map(|t| t.text.chars()).filter(|c| *c != ' ').collect();
    assert_eq!(joined, expected);
    assert!(stats.scratch_growths >= 1);
    assert!(stats.output_growths >= 1);
    Ok(())
}

#[test]
fn test_leading_continuation_byte_is_rejected() -> Result<()> {
    let mut tokenizer = root_tokenizer()?;
    let mut collector = TokenCollector::new();
    let err = tokenizer
        .tokenize(TokenizeFlags::DOCUMENT, &[0x80, b'a', b'b'], None, &mut collector)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    assert!(matches!(err, TokenizerError::MalformedInput { offset: 0 }));
    assert!(collector.tokens().is_empty());
    Ok(())
}

#[test]
fn test_encoded_replacement_character_is_rejected() -> Result<()> {
    let mut tokenizer = root_tokenizer()?;
    let err = tokenizer.tokenize_str("ab\u{FFFD}cd").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    assert!(matches!(err, TokenizerError::MalformedInput { offset: 2 }));

    let config = TokenizerConfig::default().with_malformed_input(MalformedInputPolicy::Replace);
    let mut lenient = SegmentingTokenizer::create(&config, &BuiltinCapabilities)?;
    let texts: Vec<String> = lenient
        .tokenize_str("ab\u{FFFD}cd")?
        .into_iter()
        .map(|t| t.text)
        .collect();
    assert_eq!(texts, vec!["ab", "cd"]);
    Ok(())
}

#[test]
fn test_replace_policy_keeps_going() -> Result<()> {
    let config = TokenizerConfig::default().with_malformed_input(MalformedInputPolicy::Replace);
    let mut tokenizer = SegmentingTokenizer::create(&config, &BuiltinCapabilities)?;
    let (tokens, _) = collect(&mut tokenizer, b"caf\xC3 au\xFFlait")?;

    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["caf", "au", "lait"]);
    assert_eq!((tokens[2].start_offset, tokens[2].end_offset), (8, 12));
    Ok(())
}

#[test]
fn test_sink_stops_after_first_token() -> Result<()> {
    let mut tokenizer = root_tokenizer()?;
    let mut seen = Vec::new();
    let mut sink = |_: TokenFlags, token: &[u8], start: usize, end: usize| {
        seen.push((token.to_vec(), start, end));
        Flow::Stop
    };
    let err = tokenizer
        .tokenize(TokenizeFlags::DOCUMENT, b"first second third", None, &mut sink)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CallbackAbort);
    assert_eq!(seen, vec![(b"first".to_vec(), 0, 5)]);
    Ok(())
}

#[test]
fn test_flags_are_always_zero() -> Result<()> {
    let mut tokenizer = root_tokenizer()?;
    let mut flags = Vec::new();
    let mut sink = |f: TokenFlags, _: &[u8], _: usize, _: usize| {
        flags.push(f);
        Flow::Continue
    };
    tokenizer.tokenize(TokenizeFlags::QUERY, b"one two", Some("en"), &mut sink)?;
    assert_eq!(flags, vec![TokenFlags::NONE, TokenFlags::NONE]);
    Ok(())
}

#[test]
fn test_locale_presets() -> Result<()> {
    let cases = [
        ("ja", "ヒラガナ", "ひらがな"),
        ("ru", "Москва", "moskva"),
        ("el", "ΑΘΗΝΑ", "athēna"),
        ("zh", "漢語", "汉语"),
        ("zh", "ＡＢＣ", "abc"),
        ("ar", "العربية", "ālʿrbyh"),
        ("he", "עברית", "ʿbryt"),
    ];
    for (locale, input, expected) in cases {
        let config = TokenizerConfig::for_locale(locale);
        let mut tokenizer = SegmentingTokenizer::create(&config, &BuiltinCapabilities)?;
        let tokens = tokenizer.tokenize_str(input)?;
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, expected, "locale {locale}");
        assert_eq!(tokens.last().map(|t| t.end_offset), Some(input.len()), "locale {locale}");
    }
    Ok(())
}

#[test]
fn test_root_rules_fold_every_script() -> Result<()> {
    let mut tokenizer = root_tokenizer()?;
    let tokens = tokenizer.tokenize_str("Москва שלום العربية")?;
    for token in &tokens {
        assert!(token.text.is_ascii(), "{:?} is not folded", token.text);
    }
    assert_eq!(tokens[0].text, "moskva");
    Ok(())
}

#[test]
fn test_thai_is_segmented_into_words() -> Result<()> {
    let text = "ภาษาไทยง่ายนิดเดียว";
    let config = TokenizerConfig::for_locale("th");
    let mut tokenizer = SegmentingTokenizer::create(&config, &BuiltinCapabilities)?;
    let tokens = tokenizer.tokenize_str(text)?;

    assert!(tokens.len() > 1);
    assert!(tokens.len() < text.chars().count() / 2);
    let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(joined, text);

    let mut expected_start = 0;
    for token in &tokens {
        assert_eq!(token.start_offset, expected_start);
        let first = token.text.chars().next().unwrap();
        assert!(!is_combining_mark(first), "token {:?} starts with a mark", token.text);
        expected_start = token.end_offset;
    }
    assert_eq!(expected_start, text.len());
    Ok(())
}

#[test]
fn test_instances_are_send() {
    fn assert_send<T: Send>() {}
    assert_send::<SegmentingTokenizer>();
    assert_send::<TokenizerInstance>();
}
