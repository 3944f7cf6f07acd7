//! Real branches of the Lambert W function.
//!
//! W(z) solves w·eʷ = z. The principal branch W₀ covers z ≥ −1/e with
//! W₀ ≥ −1; the lower branch W₋₁ covers −1/e ≤ z < 0 with W₋₁ ≤ −1.
//!
//! Evaluation follows Fukushima (2013): power series near z = 0 and near the
//! branch point, otherwise an integer bracket from a table of n·eⁿ, a short
//! bisection in w driven by tabulated powers of e, and a single fourth-order
//! correction. Arguments past the tables start from the asymptotic
//! expansion instead. All tables are constants.

use crate::traits::lit;
use crate::FloatScalar;
use super::utils::horner;

/// e^-(k-1): `W0_EXP[n + 1]` rescales z by e^-n for n in -1..=63.
const W0_EXP: [f64; 65] = [
    2.718281828459045, 1.0, 0.36787944117144233, 0.1353352832366127,
    0.049787068367863944, 0.01831563888873418, 0.006737946999085467,
    0.0024787521766663585, 0.0009118819655545162, 0.00033546262790251185,
    0.00012340980408667956, 4.5399929762484854e-05, 1.670170079024566e-05,
    6.14421235332821e-06, 2.2603294069810542e-06, 8.315287191035679e-07,
    3.059023205018258e-07, 1.1253517471925912e-07, 4.139937718785167e-08,
    1.522997974471263e-08, 5.602796437537268e-09, 2.061153622438558e-09,
    7.582560427911907e-10, 2.7894680928689246e-10, 1.026187963170189e-10,
    3.775134544279098e-11, 1.3887943864964021e-11, 5.109089028063325e-12,
    1.8795288165390832e-12, 6.914400106940203e-13, 2.543665647376923e-13,
    9.357622968840175e-14, 3.442477108469977e-14, 1.2664165549094176e-14,
    4.658886145103398e-15, 1.713908431542013e-15, 6.305116760146989e-16,
    2.3195228302435696e-16, 8.533047625744066e-17, 3.1391327920480296e-17,
    1.1548224173015786e-17, 4.248354255291589e-18, 1.5628821893349888e-18,
    5.74952226429356e-19, 2.1151310375910805e-19, 7.781132241133797e-20,
    2.8625185805493937e-20, 1.0530617357553812e-20, 3.873997628687187e-21,
    1.4251640827409352e-21, 5.242885663363464e-22, 1.9287498479639178e-22,
    7.095474162284704e-23, 2.6102790696677047e-23, 9.602680054508676e-24,
    3.532628572200807e-24, 1.2995814250075031e-24, 4.780892883885469e-25,
    1.7587922024243116e-25, 6.47023492564546e-26, 2.3802664086944007e-26,
    8.75651076269652e-27, 3.221340285992516e-27, 1.185064864233981e-27,
    4.359610000063081e-28,
];

/// n·e^n, the value of w·e^w at the integer w = n.
const W0_G: [f64; 65] = [
    0.0, 2.718281828459045, 14.7781121978613, 60.256610769563004, 218.39260013257694,
    742.065795512883, 2420.5727609564105, 7676.43210899921, 23847.663896333826,
    72927.75534817846, 220264.65794806718, 658615.558867176, 1953057.497028047,
    5751374.096115966, 16836459.978306875, 49035260.58708166, 142177768.32812595,
    410634196.81078005, 1181879444.471949, 3391163718.300558, 9703303908.195807,
    27695130424.14751, 78868082614.89502, 224130479263.72476, 635738931116.2433,
    1800122483434.6467, 5088969845149.808, 14365302496248.562, 40495197800161.305,
    114008694617177.22, 320594237445733.9, 900514339622670.1, 2526814725845782.0,
    7083238132935230.0, 1.9837699245933464e+16, 5.551047083097007e+16,
    1.5520433569614704e+17, 4.3360826779369664e+17, 1.2105254067703227e+18,
    3.3771426165357563e+18, 9.4154106734808e+18, 2.6233583234732253e+19,
    7.304954754386104e+19, 2.032970971338619e+20, 5.654704050318096e+20,
    1.5720421975868294e+21, 4.3682149334771266e+21, 1.2132170565093316e+22,
    3.3680332378068633e+22, 9.345998205225989e+22, 2.592352764293536e+23,
    7.187680320377388e+23, 1.9921241603726199e+24, 5.519292499505416e+24,
    1.5286067837683348e+25, 4.232131895828109e+25, 1.1713293177672778e+26,
    3.240860399621482e+26, 8.964125826422603e+26, 2.4787141382364034e+27,
    6.852044338894106e+27, 1.8936217407781712e+28, 5.231781134619702e+28,
    1.4450833904658542e+29, 3.990495411719435e+29,
];

/// e^(k+1): `WM1_EXP[n - 1]` rescales z by e^n.
const WM1_EXP: [f64; 64] = [
    2.718281828459045, 7.38905609893065, 20.085536923187668, 54.598150033144236,
    148.4131591025766, 403.4287934927351, 1096.6331584284585, 2980.9579870417283,
    8103.083927575384, 22026.465794806718, 59874.14171519782, 162754.79141900392,
    442413.3920089205, 1202604.2841647768, 3269017.3724721107, 8886110.520507872,
    24154952.7535753, 65659969.13733051, 178482300.96318725, 485165195.4097903,
    1318815734.4832146, 3584912846.131592, 9744803446.248903, 26489122129.84347,
    72004899337.38588, 195729609428.83878, 532048240601.79865, 1446257064291.475,
    3931334297144.042, 10686474581524.463, 29048849665247.426, 78962960182680.69,
    214643579785916.06, 583461742527454.9, 1586013452313430.8, 4311231547115195.0,
    1.1719142372802612e+16, 3.1855931757113756e+16, 8.659340042399374e+16,
    2.3538526683702e+17, 6.398434935300549e+17, 1.739274941520501e+18,
    4.727839468229346e+18, 1.2851600114359308e+19, 3.4934271057485095e+19,
    9.496119420602448e+19, 2.5813128861900675e+20, 7.016735912097631e+20,
    1.9073465724950998e+21, 5.184705528587072e+21, 1.4093490824269389e+22,
    3.831008000716577e+22, 1.0413759433029089e+23, 2.830753303274694e+23,
    7.694785265142018e+23, 2.091659496012996e+24, 5.685719999335932e+24,
    1.545538935590104e+25, 4.2012104037905144e+25, 1.1420073898156842e+26,
    3.10429793570192e+26, 8.438356668741454e+26, 2.29378315946961e+27,
    6.235149080811617e+27,
];

/// −n·e^−n for n = k+1, the value of w·e^w at the integer w = −n.
const WM1_G: [f64; 64] = [
    -0.36787944117144233, -0.2706705664732254, -0.14936120510359183,
    -0.07326255555493671, -0.03368973499542734, -0.014872513059998151,
    -0.006383173758881614, -0.002683701023220095, -0.001110688236780116,
    -0.0004539992976248485, -0.00018371870869270227, -7.373054823993851e-05,
    -2.9384282290753705e-05, -1.164140206744995e-05, -4.588534807527387e-06,
    -1.8005627955081459e-06, -7.037894121934784e-07, -2.741396354048273e-07,
    -1.0645313231320808e-07, -4.122307244877116e-08, -1.5923376898615004e-08,
    -6.136829804311634e-09, -2.3602323152914347e-09, -9.060322906269835e-10,
    -3.471985966241005e-10, -1.3283631472964644e-10, -5.074727804655525e-11,
    -1.936032029943257e-11, -7.376630377393076e-12, -2.8072868906520526e-12,
    -1.0671679036256928e-12, -4.052532975710136e-13, -1.5374324278841212e-13,
    -5.827288667242844e-14, -2.2067908660514462e-14, -8.35028218887685e-15,
    -3.1572276215253042e-15, -1.1928704609782513e-15, -4.503807427476156e-16,
    -1.6993417021166355e-16, -6.407816976273453e-17, -2.4147993510032952e-17,
    -9.095063461641647e-18, -3.4236981860988703e-18, -1.2881333612472272e-18,
    -4.844083984474754e-19, -1.820778885482978e-19, -6.840787597156489e-20,
    -2.5690139750480974e-20, -9.643749239819589e-21, -3.6186918227651994e-21,
    -1.3573451162272066e-21, -5.089420428889598e-22, -1.9076194289884357e-22,
    -7.147697837541266e-23, -2.677300014975863e-23, -1.0025115553818576e-23,
    -3.752736256874367e-24, -1.4043571811296964e-24, -5.253906457617913e-25,
    -1.9650175744554348e-25, -7.347402158250682e-26, -2.746554300039741e-26,
    -1.0264389699511283e-26,
];

/// e^−b_j, multiplier for y = z·e^−w when w advances by b_j.
const W0_A: [f64; 12] = [
    0.6065306597126334, 0.7788007830714049, 0.8824969025845955, 0.9394130628134758,
    0.9692332344763441, 0.9844964370054085, 0.9922179382602435, 0.9961013694701175,
    0.9980487811074755, 0.9990239141819757, 0.9995118379398894, 0.9997558891748972,
];

/// e^b_j, multiplier for y = z·e^−w when w retreats by b_j.
const WM1_A: [f64; 12] = [
    1.6487212707001282, 1.2840254166877414, 1.1331484530668263, 1.0644944589178593,
    1.0317434074991028, 1.0157477085866857, 1.007843097206448, 1.0039138893383475,
    1.0019550335910028, 1.0009770394924165, 1.0004884004786945, 1.0002441704297478,
];

/// b_j = 2^−(j+1), the bisection step widths.
const HALVES: [f64; 12] = [
    0.5, 0.25, 0.125, 0.0625, 0.03125, 0.015625, 0.0078125, 0.00390625, 0.001953125,
    0.0009765625, 0.00048828125, 0.000244140625,
];

/// Coefficients of W(z) as a power series in p = ±√(2(e·z + 1)) about
/// the branch point z = −1/e, ascending.
const BRANCH_SERIES: [f64; 21] = [
    -1.0,
    1.0,
    -0.333333333333333333,
    0.152777777777777778,
    -0.0796296296296296296,
    0.0445023148148148148,
    -0.0259847148736037625,
    0.0156356325323339212,
    -0.00961689202429943171,
    0.00601454325295611786,
    -0.00381129803489199923,
    0.00244087799114398267,
    -0.00157693034468678425,
    0.00102626332050760715,
    -0.000672061631156136204,
    0.000442473061814620910,
    -0.000292677224729627445,
    0.000194387276054539318,
    -0.000129574266852748819,
    0.0000866503580520812717,
    -0.0000581136075044138168,
];

/// Maclaurin coefficients of W₀(z)/z, ascending.
const ZERO_SERIES: [f64; 17] = [
    1.0,
    -1.0,
    1.5,
    -2.6666666666666666667,
    5.2083333333333333333,
    -10.8,
    23.343055555555555556,
    -52.012698412698412698,
    118.62522321428571429,
    -275.57319223985890653,
    649.78717234347442681,
    -1551.1605194805194805,
    3741.4497029592385495,
    -9104.5002411580189358,
    22324.308512706601434,
    -55103.621972903835338,
    136808.86090394293563,
];

/// |z| below which W₀ uses the Maclaurin series.
const ZERO_SERIES_RADIUS: f64 = 0.05;

/// z below which both branches use the branch-point series.
const BRANCH_SERIES_EDGE: f64 = -0.35;

/// Lambert W on the requested real branch: `0` for W₀, `-1` for W₋₁.
///
/// Returns NaN for any other branch and for z outside the branch's domain.
/// Beyond the bracket tables (z > 64·e⁶⁴ on W₀, −64·e⁻⁶⁴ < z < 0 on W₋₁)
/// the asymptotic expansion ln|z| − ln|ln|z|| seeds the correction instead.
///
/// # Example
///
/// ```
/// use distcore::special::lambert_w;
///
/// assert_eq!(lambert_w(0, 0.0_f64), 0.0);
/// assert!((lambert_w(0, core::f64::consts::E) - 1.0).abs() < 1e-14);
/// assert!((lambert_w(-1, -0.1_f64) + 3.577152063957297).abs() < 1e-13);
/// assert!(lambert_w(0, -0.5_f64).is_nan());
/// assert!(lambert_w(1, 1.0_f64).is_nan());
/// ```
pub fn lambert_w<T: FloatScalar>(branch: i32, z: T) -> T {
    match branch {
        0 => lambert_w0(z),
        -1 => lambert_wm1(z),
        _ => T::nan(),
    }
}

/// Principal branch W₀(z), z ≥ −1/e.
pub fn lambert_w0<T: FloatScalar>(z: T) -> T {
    if z.is_nan() {
        return z;
    }
    if z.abs() < lit(ZERO_SERIES_RADIUS) {
        return z * horner(z, &ZERO_SERIES);
    }
    if z < lit(BRANCH_SERIES_EDGE) {
        return near_branch_point(z, T::one());
    }

    if z.is_infinite() {
        return z;
    }

    let n = match bracket(z, |k| W0_G[k], 0, W0_G.len() - 1) {
        Some(n) => n as isize - 1,
        None => return asymptotic(z),
    };
    let steps = if z <= lit(-0.3) {
        11
    } else if n <= 0 {
        10
    } else if n <= 1 {
        9
    } else {
        8
    };

    // Bisect w in [n, n + 1) keeping y = z·e^−w.
    let mut w: T = lit(n as f64);
    let mut y = z * lit(W0_EXP[(n + 1) as usize]);
    for j in 0..steps {
        let wj = w + lit(HALVES[j]);
        let yj = y * lit(W0_A[j]);
        if wj < yj {
            w = wj;
            y = yj;
        }
    }
    final_result(w, y)
}

/// Lower branch W₋₁(z), −1/e ≤ z < 0.
pub fn lambert_wm1<T: FloatScalar>(z: T) -> T {
    if z.is_nan() || z >= T::zero() {
        return T::nan();
    }
    if z < lit(BRANCH_SERIES_EDGE) {
        return near_branch_point(z, -T::one());
    }

    let n = match bracket(z, |k| WM1_G[k - 1], 2, WM1_G.len()) {
        Some(n) => n - 1,
        None => return asymptotic(z),
    };
    let steps = if n >= 8 {
        8
    } else if n >= 3 {
        9
    } else if n >= 2 {
        10
    } else {
        11
    };

    // Bisect w in (−n − 1, −n] keeping y = z·e^−w.
    let mut w: T = -lit::<T>(n as f64);
    let mut y = z * lit(WM1_EXP[n - 1]);
    for j in 0..steps {
        let wj = w - lit(HALVES[j]);
        let yj = y * lit(WM1_A[j]);
        if wj < yj {
            w = wj;
            y = yj;
        }
    }
    final_result(w, y)
}

/// Smallest n ≥ `first` with g(n) > z, for g increasing over `first..=max`.
///
/// Checks n up to 2 directly, then doubles up to `max` and binary-searches
/// back down. `None` when z lies beyond g(max).
fn bracket<T: FloatScalar>(
    z: T,
    g: impl Fn(usize) -> f64,
    first: usize,
    max: usize,
) -> Option<usize> {
    if let Some(n) = (first..=2).find(|&k| lit::<T>(g(k)) > z) {
        return Some(n);
    }

    let mut n = 2;
    loop {
        n *= 2;
        if n > max {
            return None;
        }
        if lit::<T>(g(n)) > z {
            break;
        }
    }

    let mut half = n / 2;
    loop {
        half /= 2;
        if half == 0 {
            return Some(n);
        }
        if lit::<T>(g(n - half)) > z {
            n -= half;
        }
    }
}

/// Large-|ln|z|| start w = L₁ − L₂ + L₂/L₁ with L₁ = ln|z| and L₂ = ln|L₁|,
/// refined by two corrections. Serves both branches past their tables.
fn asymptotic<T: FloatScalar>(z: T) -> T {
    let l1 = z.abs().ln();
    let l2 = l1.abs().ln();
    let mut w = l1 - l2 + l2 / l1;
    for _ in 0..2 {
        // y = z·e^−w, formed in log space to stay finite at subnormal z.
        let y = (l1 - w).exp() * z.signum();
        w = final_result(w, y);
    }
    w
}

/// Series in p = sign·√(2(e·z + 1)) about z = −1/e.
///
/// Slightly below −1/e (within rounding of the branch point) returns −1.
fn near_branch_point<T: FloatScalar>(z: T, sign: T) -> T {
    let two = T::one() + T::one();
    let p2 = two * (lit::<T>(core::f64::consts::E) * z + T::one());
    if p2 > T::zero() {
        let p = sign * p2.sqrt();
        let ap = p.abs();
        let degree = if ap < lit(0.01159) {
            6
        } else if ap < lit(0.0766) {
            10
        } else {
            20
        };
        return horner(p, &BRANCH_SERIES[..=degree]);
    }
    if p2 >= lit::<T>(-4.0) * T::epsilon() {
        return -T::one();
    }
    T::nan()
}

/// Fourth-order (Schröder) correction of w given y = z·e^−w.
fn final_result<T: FloatScalar>(w: T, y: T) -> T {
    let one = T::one();
    let f0 = w - y;
    let f1 = one + y;
    let f00 = f0 * f0;
    let f11 = f1 * f1;
    let f0y = f0 * y;
    let num = lit::<T>(4.0) * f0 * (lit::<T>(6.0) * f1 * (f11 + f0y) + f00 * y);
    let den = f11 * (lit::<T>(24.0) * f11 + lit::<T>(36.0) * f0y)
        + f00 * (lit::<T>(6.0) * y * y + lit::<T>(8.0) * f1 * y + f0y);
    w - num / den
}
