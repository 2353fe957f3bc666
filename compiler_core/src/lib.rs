use string_interner::DefaultStringInterner;
use frontend::ast;
use frontend::parse_tree::FunctionDefinition;
use frontend::semantic_analyzer::{IdentifierClass, SemanticAnalyzer, SymbolTable};
use frontend::token::Token;
use frontend::{CompileError, ConstantPropagation, Lexer, Parser, SourceCode, DEFAULT_MAX_RECURSION_DEPTH};

/// Knobs for a `CompilerSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Run constant propagation after semantic analysis.
    pub optimize: bool,
    /// Nesting limit for expressions in the parser.
    pub max_recursion_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }
}

/// Name and class of one slot of a compiled function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    pub name: String,
    pub class: IdentifierClass,
}

/// A function ready for evaluation.
///
/// Slots are indexed by identifier id: parameters first, then variables,
/// then constants. `slots` holds their initial values. Nothing here borrows
/// the source or the session, so a compiled function can be shared freely
/// between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFunction {
    pub ast: ast::Function,
    pub parameter_count: usize,
    pub slots: Vec<i64>,
    pub names: Vec<SlotInfo>,
}

impl CompiledFunction {
    fn new(ast: ast::Function, symbols: &SymbolTable, string_interner: &DefaultStringInterner) -> Self {
        let names = symbols
            .iter()
            .map(|identifier| SlotInfo {
                name: string_interner
                    .resolve(identifier.name)
                    .unwrap_or_default()
                    .to_string(),
                class: identifier.class,
            })
            .collect();
        Self {
            ast,
            parameter_count: symbols.parameter_count(),
            slots: symbols.slots(),
            names,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// Compiler session that serves as the central context for compilation.
///
/// The session owns the string interner every identifier is interned into,
/// so symbols in the ASTs it produces resolve through `string_interner()`.
pub struct CompilerSession {
    string_interner: DefaultStringInterner,
    options: CompileOptions,
}

impl CompilerSession {
    pub fn new() -> Self {
        Self::with_options(CompileOptions::default())
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            string_interner: DefaultStringInterner::new(),
            options,
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Run the lexer alone over the whole input.
    pub fn tokenize(&self, source: &SourceCode) -> Result<Vec<Token>, CompileError> {
        Ok(Lexer::new(source).tokenize()?)
    }

    /// Lex and parse, producing the concrete parse tree.
    pub fn parse(&self, source: &SourceCode) -> Result<FunctionDefinition, CompileError> {
        let mut parser = Parser::with_max_recursion_depth(source, self.options.max_recursion_depth);
        Ok(parser.parse_function_definition()?)
    }

    /// Parse and analyse, producing the AST before any optimization.
    pub fn analyse(&mut self, source: &SourceCode) -> Result<(ast::Function, SymbolTable), CompileError> {
        let tree = self.parse(source)?;
        let analyzer = SemanticAnalyzer::new(&mut self.string_interner);
        Ok(analyzer.analyse_function(&tree)?)
    }

    /// Run the whole pipeline.
    pub fn compile(&mut self, source: &SourceCode) -> Result<CompiledFunction, CompileError> {
        let (mut function, symbols) = self.analyse(source)?;
        if self.options.optimize {
            let mut optimizer = ConstantPropagation::new();
            optimizer.optimize(&mut function);
        }
        let compiled = CompiledFunction::new(function, &symbols, &self.string_interner);
        frontend::debug_log!(
            "compiled function: {} parameter(s), {} slot(s)",
            compiled.parameter_count,
            compiled.slot_count()
        );
        Ok(compiled)
    }

    pub fn compile_str(&mut self, text: &str) -> Result<CompiledFunction, CompileError> {
        self.compile(&SourceCode::new(text))
    }

    pub fn string_interner(&self) -> &DefaultStringInterner {
        &self.string_interner
    }
}

impl Default for CompilerSession {
    fn default() -> Self {
        Self::new()
    }
}
