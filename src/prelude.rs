pub use crate::data_structs::dataset::{
    Dataset,
    GroupLabel,
};
pub use crate::data_structs::enums::{
    CorrectionMethod,
    CorrectionScope,
    NormalityTest,
    PValueFormat,
    TTestVariant,
    TestKind,
};
pub use crate::data_structs::results::{
    BiomarkerReport,
    ComparisonResult,
    CorrectedResult,
    NormalityResult,
    OmnibusResult,
};
pub use crate::error::SigboxError;
pub use crate::io::{
    read_dataset,
    read_dataset_with_options,
};
pub use crate::plots::{
    generate_boxplots_with_significance,
    Geometry,
    PlotConfig,
    SignificanceLayout,
};
pub use crate::tools::stats::{
    analyze_biomarker,
    analyze_dataset,
    check_normality,
    correct_p_values,
    normality_table,
    run_pairwise,
    select_pairwise,
    select_test,
    variance_table,
    AnalysisOptions,
};
