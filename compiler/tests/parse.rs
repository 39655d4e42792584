use start_compiler::{
    config::ParserConfig,
    def::{Definition, ExprDef, Program, ReplInput},
    error::{CompilerError, LexError, ParseError},
    expr::{Expr, Identifier, NumberLiteral, Radix, TypeExpr},
    node_types::{node_types_json, to_sexp, Grammar},
    parse_program, parse_program_with_config, parse_repl_input, parse_repl_input_with_config,
    pos::{BytePos, Span},
    token::Token,
    tokenize,
};

fn ident(s: &str) -> Identifier {
    Identifier::new(s).expect("valid identifier")
}

fn first_def(source: &str) -> ExprDef {
    let program = parse_program(source).expect("Expected a program");
    match program.into_iter().next() {
        Some(Definition::ExprDef(def)) => def,
        other => panic!("expected a definition, got {other:?}"),
    }
}

#[test]
fn test_untyped_definition() {
    assert_eq!(
        first_def("def n := 1"),
        ExprDef {
            name: ident("n"),
            ty: None,
            body: Expr::Constant(NumberLiteral::new(Radix::Decimal, "1").expect("valid literal")),
        }
    );
}

#[test]
fn test_typed_definition() {
    assert_eq!(
        first_def("def n : T := 1").ty,
        Some(TypeExpr::NamedType(ident("T")))
    );
}

#[test]
fn test_canonical_text() {
    let program = parse_program("def a : N := 2  \ndef   b  : N:= (1).").expect("Expected a program");
    assert_eq!(program.to_string(), "def a : N := 2\ndef b : N := 1\n");
}

#[test]
fn test_empty_program() {
    assert_eq!(parse_program(""), Ok(Program::default()));
}

#[test]
fn test_number_radix() {
    for (source, radix, digits) in [
        ("0x1F", Radix::Hex, "1F"),
        ("0o17", Radix::Octal, "17"),
        ("0b101", Radix::Binary, "101"),
        ("1_000", Radix::Decimal, "1_000"),
    ] {
        let tokens = tokenize(source).expect("Expected source to lex");
        assert_eq!(
            tokens[0].value,
            Token::Number(NumberLiteral::new(radix, digits).expect("valid literal"))
        );
    }
}

#[test]
fn test_keyword_boundary() {
    let tokens = tokenize("define").expect("Expected source to lex");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].value, Token::Identifier(ident("define")));
}

#[test]
fn test_repl_discrimination() {
    assert!(matches!(
        parse_repl_input("(x')."),
        Ok(ReplInput::Expression(Expr::IdentRef(_)))
    ));

    match parse_repl_input("def a := 1 def b := 2") {
        Ok(ReplInput::Definitions(defs)) => assert_eq!(defs.len(), 2),
        other => panic!("expected definitions, got {other:?}"),
    }

    assert!(matches!(
        parse_repl_input("   "),
        Err(CompilerError::Parse(ParseError::MissingExpression { .. }))
    ));
    assert!(matches!(
        parse_repl_input("def"),
        Err(CompilerError::Parse(ParseError::MissingIdentifier { .. }))
    ));
}

#[test]
fn test_operators_are_not_part_of_the_language() {
    assert_eq!(
        parse_repl_input("1 + 1."),
        Err(CompilerError::Lex(LexError::UnexpectedChar {
            ch: '+',
            pos: BytePos(2)
        }))
    );
}

#[test]
fn test_error_locality() {
    let source = "def a := 1\ndef b 2";
    let err = parse_program(source).unwrap_err();

    assert!(matches!(
        err,
        CompilerError::Parse(ParseError::MissingAssignOperator { .. })
    ));
    assert_eq!(err.pos(), BytePos(17));
    assert_eq!(err.span(), Some(Span::new(BytePos(17), BytePos(18))));
    assert_eq!(&source[17..18], "2");
}

#[test]
fn test_input_too_large() {
    let config = ParserConfig::default().with_max_source_len(8);

    assert_eq!(
        parse_program_with_config("def a := 1", &config),
        Err(CompilerError::InputTooLarge { len: 10, limit: 8 })
    );
    assert!(parse_repl_input_with_config("x.", &config).is_ok());
}

#[test]
fn test_sexp_matches_catalog_names() {
    let program = parse_program("def a : N := 1").expect("Expected a program");
    let sexp = to_sexp(&program);
    let catalog = node_types_json(Grammar::Start).expect("Expected catalog json");

    assert_eq!(
        sexp,
        "(program (expr_def name: (ident) type: (ty_restr (ident)) body: (constant (number_N))))"
    );
    for name in ["expr_def", "ty_restr", "ident", "constant", "number_N"] {
        assert!(catalog.contains(&format!("\"{name}\"")), "catalog lacks {name}");
    }
}
