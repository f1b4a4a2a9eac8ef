//! Test resources
mod scenario;
pub use scenario::Scenario;

/// Observation file, three epochs. The header carries constellation
/// description lines that must not be mistaken for measurements.
pub const OBSERVATION: &str = "     3.04           OBSERVATION DATA    M                   RINEX VERSION / TYPE
G    4 C1C S1C D1C                                          SYS / # / OBS TYPES
G01  this line precedes the first epoch                     COMMENT
                                                            END OF HEADER
> 2022 01 05 00 14 30.0000000  0  4
G03  20422476.680  44.000  -2012.375
G04  21345678.125  41.250
G09  23456789.500
R05  19876543.210  38.000   1520.000
> 2022 01 05 00 30  0.0000000  0  3
G03  20422000.000  44.000  -2012.375
G04  21345000.000
G09  23456000.000
> 2022 01 05 01 05 15.0000000  0  1
G03  20421000.000
";

/// Precise ephemeris file, two epochs
pub const EPHEMERIS: &str = "#dP2022  1  5  0  0  0.00000000      96 ORBIT IGS14 HLM  IGS
## 2191 259200.00000000   900.00000000 59584 0.0000000000000
+   32   G01G02G03G04G05G06G07G08G09G10G11G12G13G14G15G16G17
%c G  cc GPS ccc cccc cccc cccc cccc ccccc ccccc ccccc ccccc
/* CENTER FOR ORBIT DETERMINATION IN EUROPE
*  2022  1  5  0  0  0.00000000
PG03  13795.433622 -21868.458254   6307.187815     12.523456
PG04 -10231.742551 -23412.012356  -4712.364528   -150.123000
PG09   3402.321112  20312.456221  16872.111333      1.000000
*  2022  1  5  0 15  0.00000000
PG03  14023.112233 -21535.987654   7120.555444     12.524000
PG04 -10012.331122 -23511.123456  -3912.111222   -150.122000
PG09   3602.321112  20112.456221  17072.111333      1.000100
EOF
*  2022  1  5  0 30  0.00000000
PG03  14023.112233 -21535.987654   7120.555444     12.524000
";
