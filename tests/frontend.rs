use mc::{
    analyze,
    parse::{
        ast::{BinOp, Node, NodeKind, Rule},
        error::ParserErrorKind,
    },
    scan::{error::ScannerErrorKind, token::TokenKind, tokenize},
    FrontendError,
};

const PROGRAM: &str = include_str!("../demos/programa.mc");

fn find<'a>(node: &'a Node, pred: &dyn Fn(&Node) -> bool) -> Option<&'a Node> {
    if pred(node) {
        return Some(node);
    }
    node.children.iter().find_map(|c| find(c, pred))
}

#[test]
fn demo_program_is_valid() {
    let root = analyze(PROGRAM).unwrap();
    assert!(root.is_rule(Rule::Program));
    assert_eq!(root.children.len(), 7);
    assert_eq!(root.children[2].children.len(), 2);
    assert_eq!(root.children[5].children.len(), 3);

    let ge = find(&root, &|n| n.is_bin_op(BinOp::GreaterEqual)).unwrap();
    assert_eq!(ge.children.len(), 2);
    let and = find(&root, &|n| n.is_bin_op(BinOp::And)).unwrap();
    assert!(and.children.iter().all(|c| c.is_rule(Rule::RelationalExpr)));
}

#[test]
fn tree_leaves_spell_out_the_input() {
    let text = "inicio decls a:int fimdecls codigo a = (a + 2) * 3 fimprog";
    let root = analyze(text).unwrap();
    fn leaves(node: &Node, out: &mut Vec<String>) {
        if let NodeKind::Terminal(tok) = &node.kind {
            out.push(tok.inner.lexeme().unwrap_or_default().to_string());
        }
        for child in &node.children {
            leaves(child, out);
        }
    }
    let mut out = vec![];
    leaves(&root, &mut out);
    // Operators are folded into operator nodes, everything else is a leaf.
    assert_eq!(
        out.join(" "),
        "inicio decls a : int fimdecls codigo a = ( a 2 ) 3 fimprog"
    );
}

#[test]
fn token_positions_never_decrease() {
    let tokens = tokenize(PROGRAM).unwrap();
    let positions: Vec<_> = tokens.iter().map(|t| (t.line(), t.column())).collect();
    assert!(positions.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(
        tokens.iter().filter(|t| t.inner.kind == TokenKind::EndOfFile).count(),
        1
    );
}

#[test]
fn keywords_are_case_insensitive_in_programs() {
    let root = analyze("INICIO Decls X:Int FimDecls CODIGO Leia X FIMPROG").unwrap();
    assert_eq!(root.children[0].label(), "INICIO(INICIO)");
    assert_eq!(root.children[3].label(), "FIMDECLS(FimDecls)");
}

#[test]
fn reserved_words_cannot_be_identifiers() {
    let e = analyze("inicio decls while:int fimdecls codigo fimprog").unwrap_err();
    match e {
        FrontendError::Parse(e) => {
            assert!(matches!(*e.kind, ParserErrorKind::InvalidDeclaration(_)));
            assert_eq!(e.found().inner.kind, TokenKind::While);
        }
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn lexical_faults_report_position_and_character() {
    let cases = [
        ("x = 1.", ScannerErrorKind::MissingFractionDigits, (1, 5), Some('.')),
        ("x = 1.2.3", ScannerErrorKind::MultipleDecimalPoints, (1, 8), Some('.')),
        ("x = 1 .5", ScannerErrorKind::DecimalPointAfterNumber, (1, 5), Some('.')),
        ("\n x ! y", ScannerErrorKind::BareExclamation, (2, 4), Some('!')),
        ("a\n/* open", ScannerErrorKind::UnterminatedBlockComment, (2, 1), None),
        ("x = @", ScannerErrorKind::InvalidCharacter, (1, 5), Some('@')),
    ];
    for (text, kind, (line, column), found) in cases {
        match analyze(text).unwrap_err() {
            FrontendError::Scan(e) => {
                assert_eq!(e.kind, kind, "{}", text);
                assert_eq!((e.line(), e.column()), (line, column), "{}", text);
                assert_eq!(e.found, found, "{}", text);
            }
            e => panic!("{}: unexpected error {:?}", text, e),
        }
    }
}

#[test]
fn fault_messages_carry_position_and_offender() {
    let e = analyze("x = 1;").unwrap_err();
    assert_eq!(
        e.to_string(),
        "lexical error: <input>: invalid character at line 1, column 6 (char: ';')"
    );

    let e = analyze("inicio decls fimdecls codigo\n  x = 2 +\nfimprog").unwrap_err();
    assert_eq!(
        e.to_string(),
        "syntax error: <input>: unexpected factor in expression near FIMPROG(fimprog) \
         (line 3, column 1) in Programa -> Comandos -> Comando -> Atribuicao -> ExpressaoLogica"
    );
}
